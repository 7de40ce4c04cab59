//! Inflection helpers.
//!
//! Case conversion is delegated to [`heck`]; English pluralization and
//! singularization use suffix rules compiled once into [`Regex`] tables, with
//! a short list of irregular and uncountable words. Only the trailing word of
//! a phrase is inflected, so `"Blog Category"` pluralizes to
//! `"Blog Categories"` and `"blog_categories"` singularizes to
//! `"blog_category"`.

use std::sync::OnceLock;

use heck::{ToSnakeCase, ToTitleCase, ToUpperCamelCase};
use regex::Regex;

const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "jeans",
    "police",
    "news",
];

/// `(singular, plural)` pairs.
const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("child", "children"),
    ("sex", "sexes"),
    ("move", "moves"),
    ("zombie", "zombies"),
];

const PLURAL_RULES: &[(&str, &str)] = &[
    (r"(?i)(quiz)$", "${1}zes"),
    (r"(?i)^(oxen)$", "${1}"),
    (r"(?i)^(ox)$", "${1}en"),
    (r"(?i)^(m|l)ice$", "${1}ice"),
    (r"(?i)^(m|l)ouse$", "${1}ice"),
    (r"(?i)(matr|vert|ind)(?:ix|ex)$", "${1}ices"),
    (r"(?i)(x|ch|ss|sh)$", "${1}es"),
    (r"(?i)([^aeiouy]|qu)y$", "${1}ies"),
    (r"(?i)(hive)$", "${1}s"),
    (r"(?i)(?:([^f])fe|([lr])f)$", "${1}${2}ves"),
    (r"(?i)sis$", "ses"),
    (r"(?i)([ti])a$", "${1}a"),
    (r"(?i)([ti])um$", "${1}a"),
    (r"(?i)(buffal|tomat)o$", "${1}oes"),
    (r"(?i)(bu)s$", "${1}ses"),
    (r"(?i)(alias|status)$", "${1}es"),
    (r"(?i)(octop|vir)i$", "${1}i"),
    (r"(?i)(octop|vir)us$", "${1}i"),
    (r"(?i)^(ax|test)is$", "${1}es"),
    (r"(?i)s$", "s"),
    (r"$", "s"),
];

const SINGULAR_RULES: &[(&str, &str)] = &[
    (r"(?i)(database)s$", "${1}"),
    (r"(?i)(quiz)zes$", "${1}"),
    (r"(?i)(matr)ices$", "${1}ix"),
    (r"(?i)(vert|ind)ices$", "${1}ex"),
    (r"(?i)^(ox)en", "${1}"),
    (r"(?i)(alias|status)(es)?$", "${1}"),
    (r"(?i)(octop|vir)(us|i)$", "${1}us"),
    (r"(?i)^(a)x[ie]s$", "${1}xis"),
    (r"(?i)(cris|test)(is|es)$", "${1}is"),
    (r"(?i)(shoe)s$", "${1}"),
    (r"(?i)(o)es$", "${1}"),
    (r"(?i)(bus)(es)?$", "${1}"),
    (r"(?i)^(m|l)ice$", "${1}ouse"),
    (r"(?i)(x|ch|ss|sh)es$", "${1}"),
    (r"(?i)(m)ovies$", "${1}ovie"),
    (r"(?i)(s)eries$", "${1}eries"),
    (r"(?i)([^aeiouy]|qu)ies$", "${1}y"),
    (r"(?i)([lr])ves$", "${1}f"),
    (r"(?i)(tive)s$", "${1}"),
    (r"(?i)(hive)s$", "${1}"),
    (r"(?i)([^f])ves$", "${1}fe"),
    (r"(?i)(^analy)(sis|ses)$", "${1}sis"),
    (
        r"(?i)((a)naly|(b)a|(d)iagno|(p)arenthe|(p)rogno|(s)ynop|(t)he)(sis|ses)$",
        "${1}sis",
    ),
    (r"(?i)([ti])a$", "${1}um"),
    (r"(?i)(n)ews$", "${1}ews"),
    (r"(?i)(ss)$", "${1}"),
    (r"(?i)s$", ""),
];

fn compile(rules: &'static [(&'static str, &'static str)]) -> Vec<(Regex, &'static str)> {
    rules
        .iter()
        .map(|(pattern, replacement)| (Regex::new(pattern).expect("valid regex"), *replacement))
        .collect()
}

fn plural_rules() -> &'static [(Regex, &'static str)] {
    static RULES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    RULES.get_or_init(|| compile(PLURAL_RULES))
}

fn singular_rules() -> &'static [(Regex, &'static str)] {
    static RULES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    RULES.get_or_init(|| compile(SINGULAR_RULES))
}

/// Splits a phrase into everything up to and including the last separator,
/// and the trailing word.
fn split_last_word(phrase: &str) -> (&str, &str) {
    phrase
        .char_indices()
        .rev()
        .find(|(_, c)| !c.is_alphanumeric())
        .map_or(("", phrase), |(i, c)| phrase.split_at(i + c.len_utf8()))
}

/// Returns the byte offset at which `suffix` (lowercase) starts in `word`, if
/// `word` ends with it as a whole word or as a capitalized camel-case segment.
fn word_suffix(word: &str, suffix: &str) -> Option<usize> {
    if word.len() < suffix.len() || !word.is_char_boundary(word.len() - suffix.len()) {
        return None;
    }
    let start = word.len() - suffix.len();
    let tail = &word[start..];
    if !tail.eq_ignore_ascii_case(suffix) {
        return None;
    }
    let starts_segment = start == 0 || tail.starts_with(|c: char| c.is_uppercase());
    starts_segment.then_some(start)
}

fn inflect(word: &str, rules: &[(Regex, &'static str)], to_plural: bool) -> String {
    let (prefix, last) = split_last_word(word);
    if last.is_empty() {
        return word.to_string();
    }

    if UNCOUNTABLE
        .iter()
        .any(|u| word_suffix(last, u).is_some())
    {
        return word.to_string();
    }

    for (singular, plural) in IRREGULAR {
        let (from, to) = if to_plural {
            (singular, plural)
        } else {
            (plural, singular)
        };
        if word_suffix(last, to).is_some() {
            return word.to_string();
        }
        if let Some(start) = word_suffix(last, from) {
            let replaced = if last[start..].starts_with(|c: char| c.is_uppercase()) {
                capfirst(to)
            } else {
                (*to).to_string()
            };
            return format!("{prefix}{}{replaced}", &last[..start]);
        }
    }

    // A rule never strips the trailing word entirely (`"s"` stays `"s"`).
    rules
        .iter()
        .find(|(re, _)| re.is_match(last))
        .map(|(re, replacement)| re.replace(last, *replacement))
        .filter(|inflected| !inflected.is_empty())
        .map_or_else(
            || word.to_string(),
            |inflected| format!("{prefix}{inflected}"),
        )
}

/// Returns the plural form of the last word of `word`.
///
/// # Examples
///
/// ```
/// use adminkit_core::utils::text::pluralize;
///
/// assert_eq!(pluralize("Category"), "Categories");
/// assert_eq!(pluralize("My Category"), "My Categories");
/// assert_eq!(pluralize("person"), "people");
/// assert_eq!(pluralize("news"), "news");
/// ```
pub fn pluralize(word: &str) -> String {
    inflect(word, plural_rules(), true)
}

/// Returns the singular form of the last word of `word`.
///
/// # Examples
///
/// ```
/// use adminkit_core::utils::text::singularize;
///
/// assert_eq!(singularize("blog_categories"), "blog_category");
/// assert_eq!(singularize("posts"), "post");
/// assert_eq!(singularize("status"), "status");
/// ```
pub fn singularize(word: &str) -> String {
    inflect(word, singular_rules(), false)
}

/// Converts a class name or phrase to lower `snake_case`.
///
/// Spaces, `::` and other punctuation act as word separators.
///
/// # Examples
///
/// ```
/// use adminkit_core::utils::text::underscore;
///
/// assert_eq!(underscore("BlogPost"), "blog_post");
/// assert_eq!(underscore("Blog Categories"), "blog_categories");
/// ```
pub fn underscore(s: &str) -> String {
    s.to_snake_case()
}

/// Converts an underscored token to `UpperCamelCase`.
///
/// # Examples
///
/// ```
/// use adminkit_core::utils::text::camelize;
///
/// assert_eq!(camelize("blog_category"), "BlogCategory");
/// ```
pub fn camelize(s: &str) -> String {
    s.to_upper_camel_case()
}

/// Capitalizes every word, splitting camel case and underscores.
///
/// # Examples
///
/// ```
/// use adminkit_core::utils::text::titleize;
///
/// assert_eq!(titleize("published"), "Published");
/// assert_eq!(titleize("BlogPost"), "Blog Post");
/// ```
pub fn titleize(s: &str) -> String {
    s.to_title_case()
}

/// Turns a column name into a label: drops a trailing `_id`, replaces
/// underscores with spaces and capitalizes the first word only.
///
/// # Examples
///
/// ```
/// use adminkit_core::utils::text::humanize;
///
/// assert_eq!(humanize("author_id"), "Author");
/// assert_eq!(humanize("created_at"), "Created at");
/// ```
pub fn humanize(s: &str) -> String {
    let trimmed = s.strip_suffix("_id").filter(|t| !t.is_empty()).unwrap_or(s);
    capfirst(&trimmed.replace('_', " ").to_lowercase())
}

/// Derives a conventional table name from a class name.
///
/// # Examples
///
/// ```
/// use adminkit_core::utils::text::tableize;
///
/// assert_eq!(tableize("Category"), "categories");
/// assert_eq!(tableize("BlogPost"), "blog_posts");
/// ```
pub fn tableize(class_name: &str) -> String {
    pluralize(&underscore(class_name))
}

/// Capitalizes the first character of a string.
///
/// # Examples
///
/// ```
/// use adminkit_core::utils::text::capfirst;
///
/// assert_eq!(capfirst("hello"), "Hello");
/// assert_eq!(capfirst(""), "");
/// assert_eq!(capfirst("HELLO"), "HELLO");
/// ```
pub fn capfirst(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |c| {
        let mut result = c.to_uppercase().to_string();
        result.extend(chars);
        result
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── pluralize ────────────────────────────────────────────────────

    #[test]
    fn test_pluralize_regular() {
        assert_eq!(pluralize("post"), "posts");
        assert_eq!(pluralize("Category"), "Categories");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("day"), "days");
        assert_eq!(pluralize("wife"), "wives");
        assert_eq!(pluralize("status"), "statuses");
        assert_eq!(pluralize("matrix"), "matrices");
    }

    #[test]
    fn test_pluralize_last_word_only() {
        assert_eq!(pluralize("My Category"), "My Categories");
        assert_eq!(pluralize("blog_category"), "blog_categories");
    }

    #[test]
    fn test_pluralize_irregular_keeps_case() {
        assert_eq!(pluralize("Person"), "People");
        assert_eq!(pluralize("SalesPerson"), "SalesPeople");
        assert_eq!(pluralize("child"), "children");
        assert_eq!(pluralize("people"), "people");
    }

    #[test]
    fn test_pluralize_irregular_needs_word_boundary() {
        assert_eq!(pluralize("human"), "humans");
    }

    #[test]
    fn test_pluralize_uncountable() {
        assert_eq!(pluralize("news"), "news");
        assert_eq!(pluralize("Equipment"), "Equipment");
    }

    #[test]
    fn test_pluralize_empty() {
        assert_eq!(pluralize(""), "");
    }

    // ── singularize ──────────────────────────────────────────────────

    #[test]
    fn test_singularize_regular() {
        assert_eq!(singularize("posts"), "post");
        assert_eq!(singularize("categories"), "category");
        assert_eq!(singularize("boxes"), "box");
        assert_eq!(singularize("wives"), "wife");
        assert_eq!(singularize("analyses"), "analysis");
        assert_eq!(singularize("resources"), "resource");
    }

    #[test]
    fn test_singularize_already_singular() {
        assert_eq!(singularize("category"), "category");
        assert_eq!(singularize("address"), "address");
        assert_eq!(singularize("status"), "status");
        assert_eq!(singularize("resource"), "resource");
    }

    #[test]
    fn test_singularize_last_word_only() {
        assert_eq!(singularize("blog_categories"), "blog_category");
        assert_eq!(singularize("news_items"), "news_item");
    }

    #[test]
    fn test_singularize_irregular() {
        assert_eq!(singularize("people"), "person");
        assert_eq!(singularize("Children"), "Child");
    }

    #[test]
    fn test_singularize_keeps_single_letter() {
        assert_eq!(singularize("s"), "s");
        assert_eq!(singularize("S"), "S");
        assert_eq!(singularize("blog_s"), "blog_s");
        assert_eq!(pluralize("s"), "s");
    }

    // ── case conversion ──────────────────────────────────────────────

    #[test]
    fn test_underscore() {
        assert_eq!(underscore("Category"), "category");
        assert_eq!(underscore("BlogPost"), "blog_post");
        assert_eq!(underscore("Blog Categories"), "blog_categories");
        assert_eq!(underscore("HTTPRequest"), "http_request");
    }

    #[test]
    fn test_camelize() {
        assert_eq!(camelize("blog_category"), "BlogCategory");
        assert_eq!(camelize("admin"), "Admin");
    }

    #[test]
    fn test_titleize() {
        assert_eq!(titleize("published"), "Published");
        assert_eq!(titleize("recently_updated"), "Recently Updated");
        assert_eq!(titleize("Category"), "Category");
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("title"), "Title");
        assert_eq!(humanize("author_id"), "Author");
        assert_eq!(humanize("id"), "Id");
        assert_eq!(humanize("created_at"), "Created at");
    }

    #[test]
    fn test_tableize() {
        assert_eq!(tableize("Category"), "categories");
        assert_eq!(tableize("Person"), "people");
        assert_eq!(tableize("BlogPost"), "blog_posts");
    }

    #[test]
    fn test_capfirst() {
        assert_eq!(capfirst("hello"), "Hello");
        assert_eq!(capfirst("a"), "A");
        assert_eq!(capfirst(""), "");
    }

    #[test]
    fn test_split_last_word() {
        assert_eq!(split_last_word("My Category"), ("My ", "Category"));
        assert_eq!(split_last_word("blog_post"), ("blog_", "post"));
        assert_eq!(split_last_word("post"), ("", "post"));
    }
}
