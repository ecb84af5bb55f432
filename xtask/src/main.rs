use camino::{Utf8Path, Utf8PathBuf};
use nightingale::config::import_named;
use nightingale::{Chart, ImportReport, render_svg};
use rayon::prelude::*;
use std::fs;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: cargo xtask <command>");
        eprintln!("Commands:");
        eprintln!("  gallery    Render every fixture configuration into an HTML page");
        std::process::exit(1);
    }

    match args[1].as_str() {
        "gallery" => gallery(),
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            std::process::exit(1);
        }
    }
}

/// One rendered fixture
struct Entry {
    name: String,
    svg: Result<String, String>,
    report: Option<ImportReport>,
    advisory: Option<String>,
}

fn render_fixture(path: &Utf8Path) -> Entry {
    let name = path.file_stem().unwrap_or(path.as_str()).to_string();
    eprintln!("Rendering {}...", name);

    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            return Entry {
                name,
                svg: Err(format!("read error: {e}")),
                report: None,
                advisory: None,
            };
        }
    };

    let mut chart = Chart::new();
    let report = match import_named(&mut chart, path.as_str(), &text) {
        Ok(report) => report,
        Err(e) => {
            return Entry {
                name,
                svg: Err(e.to_string()),
                report: None,
                advisory: None,
            };
        }
    };

    Entry {
        name,
        svg: render_svg(&chart).map_err(|e| format!("{e:?}")),
        report: Some(report),
        advisory: chart.angle_advisory().map(|a| a.to_string()),
    }
}

fn gallery() {
    let manifest_dir = Utf8Path::new(env!("CARGO_MANIFEST_DIR"));
    let fixtures_dir = manifest_dir.join("../tests/fixtures");
    let output_path = manifest_dir.join("../gallery.html");

    let mut paths: Vec<Utf8PathBuf> = fs::read_dir(&fixtures_dir)
        .expect("Failed to read fixtures directory")
        .filter_map(|e| e.ok())
        .filter_map(|e| Utf8PathBuf::from_path_buf(e.path()).ok())
        .filter(|p| p.extension() == Some("json"))
        .collect();
    paths.sort();

    let entries: Vec<Entry> = paths.par_iter().map(|p| render_fixture(p)).collect();

    let failed = entries.iter().filter(|e| e.svg.is_err()).count();
    let mut html = String::new();
    html.push_str(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Rose chart gallery</title>
    <style>
        body { font-family: system-ui, sans-serif; margin: 0; background: #eee; color: #333; }
        .page { max-width: 1400px; margin: 0 auto; padding: 24px; }
        h1 { font-weight: 600; font-size: 20px; }
        .grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(420px, 1fr)); gap: 16px; }
        .card { background: white; border-radius: 6px; padding: 12px; }
        .card h2 { font-size: 14px; margin: 0 0 8px; }
        .card svg { width: 100%; height: auto; }
        .note { font-size: 12px; color: #92400e; }
        .error { font-family: monospace; white-space: pre-wrap; color: #b91c1c; font-size: 12px; }
    </style>
</head>
<body>
<div class="page">
"#,
    );
    html.push_str(&format!(
        "<h1>{} charts, {} failed</h1>\n<div class=\"grid\">\n",
        entries.len(),
        failed
    ));

    for entry in &entries {
        html.push_str("<div class=\"card\">\n");
        html.push_str(&format!("<h2>{}</h2>\n", html_escape(&entry.name)));
        if let Some(advisory) = &entry.advisory {
            html.push_str(&format!("<div class=\"note\">{}</div>\n", html_escape(advisory)));
        }
        if let Some(report) = &entry.report {
            for skipped in &report.skipped {
                html.push_str(&format!(
                    "<div class=\"note\">skipped {}: {}</div>\n",
                    html_escape(&skipped.field),
                    html_escape(&skipped.reason)
                ));
            }
        }
        match &entry.svg {
            Ok(svg) => html.push_str(svg),
            Err(e) => html.push_str(&format!("<div class=\"error\">{}</div>", html_escape(e))),
        }
        html.push_str("\n</div>\n");
    }

    html.push_str("</div>\n</div>\n</body>\n</html>\n");

    fs::write(&output_path, html).expect("Failed to write gallery");
    eprintln!("Wrote {} ({} charts, {} failed)", output_path, entries.len(), failed);
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
