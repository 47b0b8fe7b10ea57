//! Mesh classification by object name
//!
//! Every object in the frame model is one of:
//! - a numbered hole (`hul1` .. `hul62`, case-insensitive, anywhere in the name)
//! - a special decorative piece (`C`, `C2`, `E`, ... exactly, or `NAME.suffix`)
//! - frame body (everything else)

use std::ops::RangeInclusive;

/// Special piece identifiers shipped with the model
pub const DEFAULT_SPECIAL_NAMES: [&str; 10] = ["C", "C2", "E", "F", "M", "O1", "O2", "O3", "R", "Z"];

/// Hole numbers present in the model
pub const DEFAULT_HOLE_RANGE: RangeInclusive<u32> = 1..=62;

/// Category of a mesh, fixed at load time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshClass {
    /// Numbered hole
    Hole(u32),
    /// Special piece, carrying the canonical identifier from the special list
    Special(String),
    FrameBody,
}

/// Find the number in the first `hul<digits>` occurrence of `name`.
/// Returns None when there is no such occurrence or the digits overflow u32.
pub fn parse_hole_number(name: &str) -> Option<u32> {
    let lower = name.to_ascii_lowercase();
    let bytes = lower.as_bytes();

    let mut search_from = 0;
    while let Some(offset) = lower[search_from..].find("hul") {
        let digits_start = search_from + offset + 3;
        let digits_len = bytes[digits_start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();

        if digits_len > 0 {
            return lower[digits_start..digits_start + digits_len].parse().ok();
        }
        search_from = digits_start;
    }
    None
}

/// Sorts mesh names into holes, specials and frame body
#[derive(Debug, Clone)]
pub struct Classifier {
    hole_range: RangeInclusive<u32>,
    special_names: Vec<String>,
}

impl Classifier {
    pub fn new(hole_range: RangeInclusive<u32>, special_names: Vec<String>) -> Self {
        Self { hole_range, special_names }
    }

    /// Identifier from the special list matching `name`, if any.
    /// Matches exactly or as `ID.<anything>`, ignoring case.
    pub fn special_name(&self, name: &str) -> Option<&str> {
        let lower = name.to_lowercase();
        self.special_names
            .iter()
            .find(|special| {
                let special = special.to_lowercase();
                lower == special
                    || lower
                        .strip_prefix(special.as_str())
                        .is_some_and(|rest| rest.starts_with('.'))
            })
            .map(String::as_str)
    }

    /// Special names win over the hole pattern, so `C.hul3` is special.
    /// Hole numbers outside the range fall through to frame body.
    pub fn classify(&self, name: &str) -> MeshClass {
        if let Some(special) = self.special_name(name) {
            return MeshClass::Special(special.to_string());
        }

        match parse_hole_number(name) {
            Some(n) if self.hole_range.contains(&n) => MeshClass::Hole(n),
            _ => MeshClass::FrameBody,
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(
            DEFAULT_HOLE_RANGE,
            DEFAULT_SPECIAL_NAMES.iter().map(|s| s.to_string()).collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hole_number() {
        assert_eq!(parse_hole_number("hul1"), Some(1));
        assert_eq!(parse_hole_number("HUL62"), Some(62));
        assert_eq!(parse_hole_number("Hul07.001"), Some(7));
        assert_eq!(parse_hole_number("frame_hul12_mesh"), Some(12));
        // First occurrence followed by digits
        assert_eq!(parse_hole_number("hulx_hul5"), Some(5));
        assert_eq!(parse_hole_number("hull"), None);
        assert_eq!(parse_hole_number("Frame"), None);
        assert_eq!(parse_hole_number("hul99999999999"), None);
    }

    #[test]
    fn test_every_numbered_hole_is_a_hole() {
        let classifier = Classifier::default();
        for n in 1..=62u32 {
            for name in [format!("hul{}", n), format!("Hul{}.002", n), format!("HUL{}", n)] {
                assert_eq!(classifier.classify(&name), MeshClass::Hole(n), "{}", name);
            }
        }
    }

    #[test]
    fn test_out_of_range_holes_are_frame_body() {
        let classifier = Classifier::default();
        assert_eq!(classifier.classify("hul0"), MeshClass::FrameBody);
        assert_eq!(classifier.classify("hul63"), MeshClass::FrameBody);
        assert_eq!(classifier.classify("hul100"), MeshClass::FrameBody);
    }

    #[test]
    fn test_special_names_exact_and_dotted() {
        let classifier = Classifier::default();
        for special in DEFAULT_SPECIAL_NAMES {
            let lower = special.to_lowercase();
            for name in [special.to_string(), lower.clone(), format!("{}.001", special), format!("{}.anything", lower)] {
                assert_eq!(
                    classifier.classify(&name),
                    MeshClass::Special(special.to_string()),
                    "{}",
                    name
                );
            }
        }
    }

    #[test]
    fn test_special_wins_over_hole_pattern() {
        let classifier = Classifier::default();
        assert_eq!(classifier.classify("C.hul3"), MeshClass::Special("C".to_string()));
        assert_eq!(classifier.classify("o1.hul1"), MeshClass::Special("O1".to_string()));
    }

    #[test]
    fn test_special_prefix_without_dot_is_not_special() {
        let classifier = Classifier::default();
        // "C2" must not be read as "C" + suffix, and "Cx" is nothing
        assert_eq!(classifier.classify("C2"), MeshClass::Special("C2".to_string()));
        assert_eq!(classifier.classify("Cx"), MeshClass::FrameBody);
        assert_eq!(classifier.classify("C_2"), MeshClass::FrameBody);
        assert_eq!(classifier.classify("Frame"), MeshClass::FrameBody);
        assert_eq!(classifier.classify("ramme"), MeshClass::FrameBody);
    }
}
