//! Markdown article bodies to sanitized HTML

use pulldown_cmark::{html, Options, Parser};

/// Render a markdown body. Raw HTML inside the markdown is sanitized, so
/// generated content can never inject scripts into the page.
pub fn render_markdown(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(source, options);
    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, parser);

    ammonia::clean(&out)
}
