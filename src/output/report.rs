//! Terminal report formatting

use crate::pipeline::{Corpus, DigestReport};
use std::fmt::Write;

/// Formats the gathering half of a digest: links, pages and warnings
pub fn format_corpus(corpus: &Corpus) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Seed: {}", corpus.seed);
    let _ = writeln!(out);

    let _ = writeln!(out, "Same-site Links ({}):", corpus.links.len());
    for link in &corpus.links {
        let _ = writeln!(out, "  - {}", link);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Pages:");
    for page in &corpus.pages {
        let _ = writeln!(
            out,
            "  {} chars  {}",
            page.text.chars().count(),
            page.url
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "Corpus: {} chars{}",
        corpus.text.chars().count(),
        if corpus.truncated { " (truncated)" } else { "" }
    );

    if !corpus.warnings.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Warnings ({}):", corpus.warnings.len());
        for warning in &corpus.warnings {
            let _ = writeln!(out, "  - {}", warning);
        }
    }

    out
}

/// Formats a full digest report, summary last
pub fn format_report(report: &DigestReport) -> String {
    let mut out = format_corpus(&report.corpus);

    let _ = writeln!(out);
    match &report.summary {
        Ok(summary) => {
            let _ = writeln!(out, "=== Summary ===\n");
            let _ = writeln!(out, "{}", summary);
        }
        Err(e) => {
            let _ = writeln!(out, "=== No Summary ===\n");
            let _ = writeln!(out, "{}", e);
        }
    }

    out
}

/// Prints a digest report to stdout
pub fn print_report(report: &DigestReport) {
    print!("{}", format_report(report));
}
