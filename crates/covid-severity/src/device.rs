//! High-flow oxygen device recognition.

use std::sync::LazyLock;

use covid_match::PatternRule;

/// `O2 hfnc`, `h.f.n.c.`, `high flow nasal cannula`, `hf prongs` and similar.
/// The cannula token must not be an `HEENT:` exam field and must end the word.
const HIGH_FLOW_DEVICE: &str = r"(?P<hfnc>(O2\s)?(h\.?f\.?|h/f|high[- ]?flow)\s?(?P<nc>(O2\s)?(n\.?[cp]\.?|n/c|(nas[ae]l[-\s]?)?(cannula|prongs?))))";

static HIGH_FLOW: LazyLock<PatternRule> = LazyLock::new(|| {
    PatternRule::builder("high_flow_device", HIGH_FLOW_DEVICE)
        .not_preceded_by("nc", r"HEENT ?: ?")
        .not_followed_by("nc", "[a-z]")
        .build()
        .expect("Invalid high-flow device regex")
});

/// Whether a device description names a high-flow device.
pub fn is_high_flow_device(device: &str) -> bool {
    !device.is_empty() && HIGH_FLOW.is_match(device)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_flow_spellings() {
        for device in [
            "HFNC",
            "hfnc 40L",
            "O2 high flow nasal cannula",
            "high-flow NC",
            "h/f n/c",
            "HF prongs",
        ] {
            assert!(is_high_flow_device(device), "{device}");
        }
    }

    #[test]
    fn plain_cannula_is_not_high_flow() {
        assert!(!is_high_flow_device("nasal cannula"));
        assert!(!is_high_flow_device("NC 2L"));
        assert!(!is_high_flow_device(""));
    }

    #[test]
    fn cannula_token_must_end_the_word() {
        assert!(!is_high_flow_device("high flow ncpap"));
    }
}
