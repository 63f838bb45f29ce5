//! Reporting policy for the differences driver.
//!
//! Tracks the streak of consecutive lookups that came back empty and formats
//! one output line per difference.

use serde::Serialize;

use mianchowla::Witness;

/// Outcome of looking up a single difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// The difference is realized by `witness`.
    Found { witness: Witness },
    /// Not realized within the bound; `last_term` is how far the sequence got.
    Missing { difference: u64, last_term: u64 },
}

impl Outcome {
    /// Plain text line, e.g. `5 = 13 - 8`.
    pub fn to_text(&self) -> String {
        match self {
            Outcome::Found { witness } => format!(
                "{} = {} - {}",
                witness.difference, witness.larger, witness.smaller
            ),
            Outcome::Missing {
                difference,
                last_term,
            } => format!(
                "Could not find difference {} within sequence to {}",
                difference, last_term
            ),
        }
    }

    /// JSON line.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Stops the driver after too many consecutive misses.
///
/// A long run of misses suggests the term bound has been exhausted for every
/// remaining difference.
#[derive(Debug, Clone)]
pub struct Report {
    max_failures: u32,
    failures: u32,
    found: u64,
    missing: u64,
}

impl Report {
    pub fn new(max_failures: u32) -> Self {
        Self {
            max_failures,
            failures: 0,
            found: 0,
            missing: 0,
        }
    }

    /// Records an outcome. Returns true once the driver should stop.
    pub fn record(&mut self, outcome: &Outcome) -> bool {
        match outcome {
            Outcome::Found { .. } => {
                self.found += 1;
                self.failures = 0;
            }
            Outcome::Missing { .. } => {
                self.missing += 1;
                self.failures += 1;
            }
        }
        self.failures >= self.max_failures
    }

    /// Current streak of consecutive misses.
    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn found(&self) -> u64 {
        self.found
    }

    pub fn missing(&self) -> u64 {
        self.missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(d: u64, larger: u64) -> Outcome {
        Outcome::Found {
            witness: Witness::new(d, larger).unwrap(),
        }
    }

    fn missing(d: u64) -> Outcome {
        Outcome::Missing {
            difference: d,
            last_term: 475,
        }
    }

    #[test]
    fn test_text_lines() {
        assert_eq!(found(5, 13).to_text(), "5 = 13 - 8");
        assert_eq!(
            missing(300).to_text(),
            "Could not find difference 300 within sequence to 475"
        );
    }

    #[test]
    fn test_json_lines() {
        assert_eq!(
            found(1, 2).to_json().unwrap(),
            r#"{"status":"found","witness":{"difference":1,"larger":2,"smaller":1}}"#
        );
        assert_eq!(
            missing(300).to_json().unwrap(),
            r#"{"status":"missing","difference":300,"last_term":475}"#
        );
    }

    #[test]
    fn test_streak_resets_on_found() {
        let mut report = Report::new(3);
        assert!(!report.record(&missing(10)));
        assert!(!report.record(&missing(11)));
        assert_eq!(report.failures(), 2);

        assert!(!report.record(&found(1, 2)));
        assert_eq!(report.failures(), 0);

        assert!(!report.record(&missing(12)));
        assert!(!report.record(&missing(13)));
        assert!(report.record(&missing(14)));

        assert_eq!(report.found(), 1);
        assert_eq!(report.missing(), 5);
    }
}
