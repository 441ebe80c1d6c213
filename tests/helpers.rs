// Shared HTML fixtures for the integration tests.

/// A well-formed page that should score well on every analyzer.
#[allow(dead_code)] // Used by other test files
pub const WELL_FORMED_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Sourdough Bakery | Fresh bread baked daily</title>
  <meta name="description" content="Visit our sourdough bakery for fresh bread baked every morning with organic flour. Order online today and pick up in store.">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <meta name="keywords" content="sourdough, bread, bakery">
  <link rel="canonical" href="https://bakery.example/">
  <link rel="icon" href="/favicon.ico">
  <style>@media (max-width: 600px) { body { font-size: 16px; } }</style>
</head>
<body>
  <main>
    <h1>Sourdough bread</h1>
    <p>Our sourdough bread is baked every morning. We use organic flour and a slow rise.</p>
    <h2>Our bread</h2>
    <p>Every loaf of bread is shaped by hand. The crust is dark and the crumb is open.</p>
    <ul><li>Country loaf</li><li>Rye bread</li></ul>
    <img src="/loaf.jpg" srcset="/loaf-2x.jpg 2x" alt="Sourdough bread loaf">
    <a href="/menu">Menu</a>
    <a href="https://flour.example/">Our flour mill</a>
  </main>
</body>
</html>"#;

/// The scenario page: short title, no description, no H1, one image
/// without alt, one internal and one external link.
#[allow(dead_code)]
pub const SCENARIO_PAGE: &str = r#"<html><head><title>A</title></head>
<body><img src="a.png"><a href="/x">x</a><a href="https://ext.com">ext</a></body></html>"#;

/// Page where "widgets" sits in the title and H1 at 6% density.
#[allow(dead_code)]
pub fn stuffed_page() -> String {
    let fillers: Vec<String> = (0..94).map(|i| format!("filler{i}")).collect();
    format!(
        "<title>Widgets</title><h1>Widgets</h1><p>{}</p><p>{}</p>",
        fillers.join(" "),
        "widgets ".repeat(4)
    )
}
