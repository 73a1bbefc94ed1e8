pub mod json;
pub mod text;

pub use json::{MetricsRecord, ScoreSummary};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to write metrics log {}: {source}", path.display())]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize metrics record: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub fn round_to(v: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (v * scale).round() / scale
}

pub fn round4(v: f64) -> f64 {
    round_to(v, 4)
}

pub fn round2(v: f64) -> f64 {
    round_to(v, 2)
}

/// Renders a float the way the log prints it: whole numbers keep one
/// decimal (`48.0`), everything else prints as is.
pub fn format_number(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

pub fn format_pct(v: Option<f64>) -> String {
    match v {
        Some(x) => format!("{:.1}%", x * 100.0),
        None => "–".to_string(),
    }
}

pub fn format_opt<T: std::fmt::Display>(v: Option<T>) -> String {
    match v {
        Some(x) => x.to_string(),
        None => "–".to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
