// SPDX-License-Identifier: MIT

use indicatif::{ProgressBar, ProgressStyle};

use crate::utils::{LogLevel, log_level};

/// Byte-count bar for the embedding pass. Hidden in quiet mode.
pub fn embed_progress(total_bytes: u64, message: &str) -> anyhow::Result<ProgressBar> {
    if log_level() == LogLevel::Quiet {
        return Ok(ProgressBar::hidden());
    }
    let pb = ProgressBar::new(total_bytes);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.white}] {bytes}/{total_bytes} {wide_msg}",
        )?
        .progress_chars("█░░"),
    );
    pb.set_message(message.to_string());
    Ok(pb)
}
