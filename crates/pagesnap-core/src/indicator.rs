use serde::Serialize;

use crate::host::{Host, ACTIVE_CLASS, DOT_CLASS};

/// One indicator dot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dot {
    pub index: usize,
    pub active: bool,
}

impl Dot {
    /// Class list for hosts that style dots by class
    pub fn classes(&self) -> Vec<&'static str> {
        if self.active {
            vec![DOT_CLASS, ACTIVE_CLASS]
        } else {
            vec![DOT_CLASS]
        }
    }
}

/// Dot list mirroring the current section, one dot per section
#[derive(Debug, Default)]
pub struct Indicator {
    dots: Vec<Dot>,
    attached: bool,
}

impl Indicator {
    pub fn attach<H: Host>(&mut self, host: &mut H) {
        if !self.attached {
            host.attach_indicator();
            self.attached = true;
        }
    }

    /// Remove the indicator and drop its dots
    pub fn detach<H: Host>(&mut self, host: &mut H) {
        self.dots.clear();
        if self.attached {
            host.detach_indicator();
            self.attached = false;
        }
    }

    /// Replace all dots with `count` fresh ones, marking `current`
    pub fn build<H: Host>(&mut self, count: usize, current: usize, host: &mut H) {
        self.dots = (0..count)
            .map(|index| Dot {
                index,
                active: index == current,
            })
            .collect();
        host.render_indicator(&self.dots);
    }

    /// Move the active mark to `current`; renders only when something changed
    pub fn sync<H: Host>(&mut self, current: usize, host: &mut H) {
        let mut changed = false;
        for dot in &mut self.dots {
            let active = dot.index == current;
            if dot.active != active {
                dot.active = active;
                changed = true;
            }
        }
        if changed {
            host.render_indicator(&self.dots);
        }
    }

    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    pub fn len(&self) -> usize {
        self.dots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dots.is_empty()
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn active(&self) -> Option<usize> {
        self.dots.iter().find(|d| d.active).map(|d| d.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessHost;
    use crate::host::Viewport;

    #[test]
    fn test_build_marks_current() {
        let mut host = HeadlessHost::new(Viewport::new(1280.0, 800.0)).unwrap();
        let mut indicator = Indicator::default();
        indicator.attach(&mut host);
        indicator.build(4, 2, &mut host);

        assert_eq!(indicator.len(), 4);
        assert_eq!(indicator.active(), Some(2));
        assert_eq!(host.dots(), indicator.dots());
        assert!(host.indicator_attached());
    }

    #[test]
    fn test_sync_skips_redundant_render() {
        let mut host = HeadlessHost::new(Viewport::new(1280.0, 800.0)).unwrap();
        let mut indicator = Indicator::default();
        indicator.build(3, 0, &mut host);
        let renders = host.indicator_renders();

        indicator.sync(0, &mut host);
        assert_eq!(host.indicator_renders(), renders);

        indicator.sync(1, &mut host);
        assert_eq!(host.indicator_renders(), renders + 1);
        assert_eq!(indicator.active(), Some(1));
    }

    #[test]
    fn test_detach_removes_dots() {
        let mut host = HeadlessHost::new(Viewport::new(1280.0, 800.0)).unwrap();
        let mut indicator = Indicator::default();
        indicator.attach(&mut host);
        indicator.build(3, 0, &mut host);
        indicator.detach(&mut host);

        assert!(indicator.is_empty());
        assert!(!indicator.is_attached());
        assert!(!host.indicator_attached());
    }

    #[test]
    fn test_dot_classes() {
        let dot = Dot { index: 0, active: true };
        assert_eq!(dot.classes(), vec!["pagesnap-dot", "active"]);
    }
}
