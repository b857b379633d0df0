use anyhow::Error;

pub(crate) fn format(err: &Error) -> String {
    let mut out = format!("Error: {err:#}");
    let hints = suggestions(err);
    if !hints.is_empty() {
        out.push_str("\n\nHints:\n");
        for hint in hints {
            out.push_str("- ");
            out.push_str(&hint);
            out.push('\n');
        }
    }
    out
}

fn suggestions(err: &Error) -> Vec<String> {
    let chain: Vec<String> = err.chain().map(|e| e.to_string()).collect();
    let haystack = chain.join(" | ").to_ascii_lowercase();
    let mut out: Vec<String> = Vec::new();

    if haystack.contains("path not found") || haystack.contains("no such file or directory") {
        push_hint(&mut out, "Verify the input file exists and is readable.");
        push_hint(
            &mut out,
            "Use an absolute path to avoid working-directory confusion.",
        );
    }

    if haystack.contains("invalid json") {
        push_hint(
            &mut out,
            "Inputs must be JSON exactly as returned by the metrics backend (one object or a list).",
        );
    }

    if haystack.contains("expected yyyy-mm-dd") || haystack.contains("date range is inverted") {
        push_hint(
            &mut out,
            "Pass dates as YYYY-MM-DD with --from on or before --to.",
        );
    }

    if haystack.contains("invalid initial_date")
        || haystack.contains("invalid final_date")
        || haystack.contains("invalid period_initial_date")
    {
        push_hint(
            &mut out,
            "Backend dates must be ISO 8601 (`2024-01-31`, `2024-01-31T00:00:00` or RFC 3339).",
        );
    }

    if haystack.contains("toml") && (haystack.contains("parse") || haystack.contains("invalid")) {
        push_hint(
            &mut out,
            "Check `canaicode.toml` syntax: sections are [filters], [catalog] and [output].",
        );
    }

    out
}

fn push_hint(out: &mut Vec<String>, hint: &str) {
    if !out.iter().any(|h| h == hint) {
        out.push(hint.to_string());
    }
}
