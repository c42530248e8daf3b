//! Location fragment sync
//!
//! Outbound writes replace the fragment with the current section's anchor,
//! skipping writes that would repeat the last one. Inbound lookups map the
//! fragment back to a section index.

use percent_encoding::percent_decode_str;
use tracing::debug;
use url::Url;

use crate::host::{Host, Section};

/// Fragment of `location` as typed, with percent-encoding undone
///
/// `Url` stores fragments encoded, so `#café` reads back as `caf%C3%A9`.
pub fn decoded_fragment(location: &Url) -> Option<String> {
    location
        .fragment()
        .map(|f| percent_decode_str(f).decode_utf8_lossy().into_owned())
}

#[derive(Debug, Clone, Default)]
pub struct HashSync {
    enabled: bool,
    last_synced: Option<String>,
}

impl HashSync {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            last_synced: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Last fragment written by [`HashSync::publish`]
    pub fn last_synced(&self) -> Option<&str> {
        self.last_synced.as_deref()
    }

    /// Write the anchor of `sections[current]` to the location, if new
    pub fn publish<H: Host>(
        &mut self,
        host: &mut H,
        sections: &[Section],
        current: usize,
    ) -> bool {
        if !self.enabled {
            return false;
        }
        let Some(anchor) = sections.get(current).and_then(Section::anchor) else {
            return false;
        };
        if self.last_synced.as_deref() == Some(anchor) {
            return false;
        }

        host.replace_fragment(anchor);
        self.last_synced = Some(anchor.to_string());
        debug!(fragment = anchor, "Location fragment updated");
        true
    }

    /// Index of the section named by the current fragment
    pub fn lookup<H: Host>(&self, host: &H, sections: &[Section]) -> Option<usize> {
        if !self.enabled {
            return None;
        }
        let fragment = host.fragment()?;
        if fragment.is_empty() {
            return None;
        }
        sections.iter().position(|s| s.anchor() == Some(fragment.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessHost;
    use crate::host::Viewport;

    fn sections() -> Vec<Section> {
        vec![
            Section::new(Some("intro".into())),
            Section::new(None),
            Section::new(Some("outro".into())),
        ]
    }

    #[test]
    fn test_publish_skips_repeats_and_missing_anchors() {
        let mut host = HeadlessHost::new(Viewport::new(1280.0, 800.0)).unwrap();
        let mut hash = HashSync::new(true);
        let sections = sections();

        assert!(hash.publish(&mut host, &sections, 0));
        assert!(!hash.publish(&mut host, &sections, 0));
        assert!(!hash.publish(&mut host, &sections, 1));
        assert_eq!(host.fragment().as_deref(), Some("intro"));

        assert!(hash.publish(&mut host, &sections, 2));
        assert_eq!(host.fragment().as_deref(), Some("outro"));
        assert_eq!(host.fragment_writes(), 2);
        assert_eq!(host.history_len(), 1);
    }

    #[test]
    fn test_lookup() {
        let mut host = HeadlessHost::new(Viewport::new(1280.0, 800.0)).unwrap();
        let hash = HashSync::new(true);
        let sections = sections();

        assert_eq!(hash.lookup(&host, &sections), None);
        host.navigate_fragment("outro");
        assert_eq!(hash.lookup(&host, &sections), Some(2));
        host.navigate_fragment("missing");
        assert_eq!(hash.lookup(&host, &sections), None);
        host.navigate_fragment("");
        assert_eq!(hash.lookup(&host, &sections), None);
    }

    #[test]
    fn test_decoded_fragment() {
        let mut url = Url::parse("pagesnap://deck/talk.txt").unwrap();
        assert_eq!(decoded_fragment(&url), None);

        url.set_fragment(Some("café"));
        assert_eq!(url.fragment(), Some("caf%C3%A9"));
        assert_eq!(decoded_fragment(&url).as_deref(), Some("café"));

        url.set_fragment(Some("my intro"));
        assert_eq!(decoded_fragment(&url).as_deref(), Some("my intro"));
    }

    #[test]
    fn test_disabled_does_nothing() {
        let mut host = HeadlessHost::new(Viewport::new(1280.0, 800.0)).unwrap();
        host.navigate_fragment("intro");
        let mut hash = HashSync::new(false);
        let sections = sections();

        assert_eq!(hash.lookup(&host, &sections), None);
        assert!(!hash.publish(&mut host, &sections, 2));
        assert_eq!(host.fragment().as_deref(), Some("intro"));
    }
}
