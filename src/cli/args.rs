use crate::error::{RosterError, RosterResult};

pub const PREFIX_NAME: &str = "n/";
pub const PREFIX_PHONE: &str = "p/";
pub const PREFIX_EMAIL: &str = "e/";
pub const PREFIX_NUSNETID: &str = "i/";
pub const PREFIX_TELEGRAM: &str = "t/";
pub const PREFIX_GROUP: &str = "g/";
pub const PREFIX_ASSIGNMENT: &str = "a/";
pub const PREFIX_WEEK: &str = "w/";
pub const PREFIX_STATUS: &str = "status/";
pub const PREFIX_FROM: &str = "from/";
pub const PREFIX_TO: &str = "to/";

/// Arguments split on `prefix/value` markers. Text before the first
/// prefix is the preamble.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ArgMap {
    preamble: String,
    values: Vec<(&'static str, String)>,
}

impl ArgMap {
    /// Splits `args` on the given prefixes. A prefix only counts at the
    /// start of the input or right after whitespace.
    pub fn tokenize(args: &str, prefixes: &[&'static str]) -> Self {
        let mut marks: Vec<(usize, &'static str)> = Vec::new();
        for prefix in prefixes {
            let mut from = 0;
            while let Some(found) = args[from..].find(prefix) {
                let pos = from + found;
                let at_boundary = pos == 0
                    || args[..pos]
                        .chars()
                        .next_back()
                        .map(char::is_whitespace)
                        .unwrap_or(false);
                if at_boundary {
                    marks.push((pos, prefix));
                }
                from = pos + prefix.len();
            }
        }
        marks.sort_by_key(|(pos, _)| *pos);

        let preamble_end = marks.first().map(|(pos, _)| *pos).unwrap_or(args.len());
        let mut values = Vec::with_capacity(marks.len());
        for (i, (pos, prefix)) in marks.iter().enumerate() {
            let start = pos + prefix.len();
            let end = marks.get(i + 1).map(|(next, _)| *next).unwrap_or(args.len());
            values.push((*prefix, args[start..end].trim().to_string()));
        }

        Self {
            preamble: args[..preamble_end].trim().to_string(),
            values,
        }
    }

    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// Last value given for `prefix`.
    pub fn value(&self, prefix: &str) -> Option<&str> {
        self.values
            .iter()
            .rev()
            .find(|(p, _)| *p == prefix)
            .map(|(_, v)| v.as_str())
    }

    pub fn has(&self, prefix: &str) -> bool {
        self.values.iter().any(|(p, _)| *p == prefix)
    }

    /// Value for a prefix that must be present.
    pub fn required(&self, prefix: &str, usage: &str) -> RosterResult<&str> {
        self.value(prefix)
            .ok_or_else(|| RosterError::Parse(format!("Invalid command format!\n{}", usage)))
    }

    pub fn verify_no_duplicates(&self, prefixes: &[&str]) -> RosterResult<()> {
        let repeated: Vec<&str> = prefixes
            .iter()
            .copied()
            .filter(|prefix| self.values.iter().filter(|(p, _)| p == prefix).count() > 1)
            .collect();
        if repeated.is_empty() {
            Ok(())
        } else {
            Err(RosterError::Parse(format!(
                "Multiple values specified for the following single-valued field(s): {}",
                repeated.join(" ")
            )))
        }
    }
}
