//! Delivery requests in the plain text input format: the first line names the algorithm,
//! `Start: <ward>` lines move the start, every other non-empty line is a ward to deliver to.
//!
//! ```text
//! A*
//! Start: Admissions
//! ICU
//! Maternity ward
//! ```
use log::info;
use std::fs;
use std::path::Path;

use crate::error::{Result, RoutingError};
use crate::solver::SearchMode;

const START_PREFIX: &str = "start:";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeliveryRequest {
    pub mode: SearchMode,
    /// Wards named on `Start:` lines, in file order. The last one that resolves wins.
    pub start_wards: Vec<String>,
    /// Wards to deliver to, in file order.
    pub wards: Vec<String>,
}

impl DeliveryRequest {
    pub fn parse(source: &str) -> DeliveryRequest {
        let mut lines = source.lines().map(str::trim);
        let mode = SearchMode::from_name(lines.next().unwrap_or_default());
        info!("Now running: {mode}");
        let mut request = DeliveryRequest {
            mode,
            ..DeliveryRequest::default()
        };
        for line in lines.filter(|l| !l.is_empty()) {
            match strip_start_prefix(line) {
                Some(start) => request.start_wards.push(start.trim().to_owned()),
                None => request.wards.push(line.to_owned()),
            }
        }
        request
    }

    pub fn load(path: &Path) -> Result<DeliveryRequest> {
        let source = fs::read_to_string(path).map_err(|source| RoutingError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(DeliveryRequest::parse(&source))
    }
}

fn strip_start_prefix(line: &str) -> Option<&str> {
    let head = line.get(..START_PREFIX.len())?;
    head.eq_ignore_ascii_case(START_PREFIX)
        .then(|| &line[START_PREFIX.len()..])
}

/// Expands a short request name into a file name: `"3"` becomes `inputfile3.txt`, `"er"` becomes
/// `inputfile_ER.txt`.
pub fn request_file_name(base: &str) -> String {
    let base = base.trim();
    if !base.is_empty() && base.chars().all(|c| c.is_ascii_digit()) {
        format!("inputfile{base}.txt")
    } else {
        format!("inputfile_{}.txt", base.to_uppercase())
    }
}
