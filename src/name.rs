//! Model name normalization.
//!
//! Every cache in this crate is keyed by the canonical form of a type name.
//! Normalization must be total and idempotent: `normalize(normalize(x)) ==
//! normalize(x)` for every input.

/// Maps a raw model name to its canonical form.
pub trait NameNormalizer: Send + Sync {
    fn normalize(&self, raw: &str) -> String;
}

/// Default normalizer: dasherizes a name.
///
/// `BlogPost`, `blogPost`, `blog_post` and `blog post` all become `blog-post`.
/// Path separators (`admin/BlogPost` -> `admin/blog-post`) are preserved.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dasherize;

impl NameNormalizer for Dasherize {
    fn normalize(&self, raw: &str) -> String {
        normalize_model_name(raw)
    }
}

impl<F> NameNormalizer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn normalize(&self, raw: &str) -> String {
        self(raw)
    }
}

/// Dasherize `raw`: split camel-case humps, lowercase, and turn spaces and
/// underscores into dashes.
pub fn normalize_model_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 4);
    let mut prev: Option<char> = None;

    for c in raw.chars() {
        if c.is_ascii_uppercase()
            && prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit())
        {
            out.push('-');
        }

        match c {
            ' ' | '_' => out.push('-'),
            _ => out.extend(c.to_lowercase()),
        }
        prev = Some(c);
    }

    out
}
