//! Built-in HTML attribute data
//!
//! The subset of the HTML Living Standard this crate ships with: global
//! attributes, the hyperlink element families, the empty (void) elements and
//! the `rel` link type vocabulary.

use crate::error::Result;

use super::attributes::AttributeSpec;
use super::builders::SchemaTableBuilder;
use super::elements::{ElementFamily, ElementSchema};
use super::facets::ValueConstraint;
use super::link_types::{LinkType, LINK_TYPES};

// =============================================================================
// Family names
// =============================================================================

/// Elements that create hyperlinks (`a`, and `area` through `image-map-area`)
pub const HYPERLINK_FAMILY: &str = "hyperlink";
/// Image map areas: hyperlinks with a shape
pub const IMAGE_MAP_AREA_FAMILY: &str = "image-map-area";
/// Embedded content with intrinsic dimensions
pub const EMBEDDED_CONTENT_FAMILY: &str = "embedded-content";

// =============================================================================
// Shared value sets
// =============================================================================

/// Referrer policy keywords
pub const REFERRER_POLICIES: &[&str] = &[
    "",
    "no-referrer",
    "no-referrer-when-downgrade",
    "origin",
    "origin-when-cross-origin",
    "same-origin",
    "strict-origin",
    "strict-origin-when-cross-origin",
    "unsafe-url",
];

/// CORS settings keywords
pub const CORS_SETTINGS: &[&str] = &["", "anonymous", "use-credentials"];

/// Elements that cannot have children
pub const EMPTY_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "meta",
    "param", "source", "track", "wbr",
];

const A: &str = "a";
const AREA: &str = "area";
const FORM: &str = "form";
const LINK: &str = "link";

/// A builder preloaded with the built-in HTML data
pub fn html_builder() -> Result<SchemaTableBuilder> {
    let mut builder = SchemaTableBuilder::new();

    builder.globals(global_attributes());

    builder
        .family(ElementFamily::new(HYPERLINK_FAMILY, hyperlink_attributes())?)
        .family(
            ElementFamily::new(
                IMAGE_MAP_AREA_FAMILY,
                [
                    AttributeSpec::string("alt"),
                    AttributeSpec::string("coords"),
                    AttributeSpec::string("name").deprecated(),
                    AttributeSpec::boolean("nohref").deprecated(),
                    AttributeSpec::enumeration("shape", &["circle", "default", "poly", "rect"]),
                    // Browsers ignore `type` on area
                    AttributeSpec::string("type").deprecated(),
                ],
            )?
            .extending(HYPERLINK_FAMILY),
        )
        .family(ElementFamily::new(
            EMBEDDED_CONTENT_FAMILY,
            [AttributeSpec::number("width"), AttributeSpec::number("height")],
        )?);

    for element in elements()? {
        builder.element(element);
    }
    for link_type in link_types() {
        builder.link_type(link_type);
    }

    Ok(builder)
}

fn global_attributes() -> Vec<AttributeSpec> {
    vec![
        // Living Standard
        AttributeSpec::string("accesskey"),
        AttributeSpec::enumeration(
            "autocapitalize",
            &["off", "none", "on", "sentences", "words", "characters"],
        ),
        AttributeSpec::string("class"),
        AttributeSpec::new(
            "contenteditable",
            ValueConstraint::Union(vec![
                ValueConstraint::BooleanishString,
                ValueConstraint::enumeration(&["inherit"]),
            ]),
        ),
        AttributeSpec::enumeration("dir", &["ltr", "rtl", "auto"]),
        AttributeSpec::booleanish("draggable"),
        AttributeSpec::boolean("hidden"),
        AttributeSpec::string("id"),
        AttributeSpec::enumeration(
            "inputmode",
            &["none", "text", "tel", "url", "email", "numeric", "decimal", "search"],
        ),
        AttributeSpec::string("is"),
        AttributeSpec::string("itemid"),
        AttributeSpec::string("itemprop"),
        AttributeSpec::string("itemref"),
        AttributeSpec::boolean("itemscope"),
        AttributeSpec::string("itemtype"),
        AttributeSpec::string("lang"),
        AttributeSpec::string("slot"),
        AttributeSpec::booleanish("spellcheck"),
        AttributeSpec::string("style"),
        AttributeSpec::number("tabindex"),
        AttributeSpec::string("title"),
        AttributeSpec::enumeration("translate", &["yes", "no"]),
        // Working draft
        AttributeSpec::string("part").experimental(),
        // Deprecated
        AttributeSpec::string("contextmenu").deprecated(),
        AttributeSpec::string("dropzone").deprecated(),
        // RDFa
        AttributeSpec::string("about"),
        AttributeSpec::string("datatype"),
        AttributeSpec::new(
            "inlist",
            ValueConstraint::Union(vec![ValueConstraint::Boolean, ValueConstraint::FreeString]),
        ),
        AttributeSpec::string("prefix"),
        AttributeSpec::string("property"),
        AttributeSpec::string("resource"),
        AttributeSpec::string("typeof"),
        AttributeSpec::string("vocab"),
        // Non-standard
        AttributeSpec::string("autocorrect"),
        AttributeSpec::string("autosave"),
        AttributeSpec::string("color"),
        AttributeSpec::number("results"),
        AttributeSpec::string("security"),
        AttributeSpec::enumeration("unselectable", &["on", "off"]),
    ]
}

fn hyperlink_attributes() -> Vec<AttributeSpec> {
    vec![
        AttributeSpec::string("download"),
        AttributeSpec::string("href"),
        AttributeSpec::string("hreflang"),
        AttributeSpec::string("media"),
        AttributeSpec::string("ping"),
        AttributeSpec::enumeration("referrerpolicy", REFERRER_POLICIES),
        AttributeSpec::tokens("rel", LINK_TYPES),
        AttributeSpec::string("target"),
        AttributeSpec::string("type"),
    ]
}

fn elements() -> Result<Vec<ElementSchema>> {
    Ok(vec![
        ElementSchema::new("a").in_family(HYPERLINK_FAMILY),
        ElementSchema::new("abbr"),
        ElementSchema::new("acronym").deprecated(),
        ElementSchema::new("address"),
        ElementSchema::new("applet").deprecated(),
        ElementSchema::new("area").in_family(IMAGE_MAP_AREA_FAMILY).empty(),
        ElementSchema::new("base")
            .empty()
            .with_attributes([AttributeSpec::string("href"), AttributeSpec::string("target")])?,
        ElementSchema::new("br").empty(),
        ElementSchema::new("col")
            .empty()
            .with_attributes([AttributeSpec::number("span")])?,
        ElementSchema::new("embed")
            .in_family(EMBEDDED_CONTENT_FAMILY)
            .empty()
            .with_attributes([AttributeSpec::string("src"), AttributeSpec::string("type")])?,
        ElementSchema::new("form").with_attributes([
            AttributeSpec::string("accept-charset"),
            AttributeSpec::string("action"),
            AttributeSpec::enumeration("autocomplete", &["on", "off"]),
            AttributeSpec::enumeration(
                "enctype",
                &["application/x-www-form-urlencoded", "multipart/form-data", "text/plain"],
            ),
            AttributeSpec::enumeration("method", &["get", "post", "dialog"]),
            AttributeSpec::string("name"),
            AttributeSpec::boolean("novalidate"),
            AttributeSpec::tokens("rel", LINK_TYPES),
            AttributeSpec::string("target"),
        ])?,
        ElementSchema::new("hr").empty(),
        ElementSchema::new("img")
            .in_family(EMBEDDED_CONTENT_FAMILY)
            .empty()
            .with_attributes([
                AttributeSpec::string("alt"),
                AttributeSpec::enumeration("crossorigin", CORS_SETTINGS),
                AttributeSpec::enumeration("decoding", &["sync", "async", "auto"]),
                AttributeSpec::boolean("ismap"),
                AttributeSpec::enumeration("loading", &["eager", "lazy"]),
                AttributeSpec::enumeration("referrerpolicy", REFERRER_POLICIES),
                AttributeSpec::string("sizes"),
                AttributeSpec::string("src"),
                AttributeSpec::string("srcset"),
                AttributeSpec::string("usemap"),
            ])?,
        ElementSchema::new("input")
            .in_family(EMBEDDED_CONTENT_FAMILY)
            .empty()
            .with_attributes([
                AttributeSpec::string("accept"),
                AttributeSpec::string("alt"),
                AttributeSpec::string("autocomplete"),
                AttributeSpec::boolean("checked"),
                AttributeSpec::boolean("disabled"),
                AttributeSpec::string("form"),
                AttributeSpec::string("list"),
                AttributeSpec::string("max"),
                AttributeSpec::number("maxlength"),
                AttributeSpec::string("min"),
                AttributeSpec::number("minlength"),
                AttributeSpec::boolean("multiple"),
                AttributeSpec::string("name"),
                AttributeSpec::string("pattern"),
                AttributeSpec::string("placeholder"),
                AttributeSpec::boolean("readonly"),
                AttributeSpec::boolean("required"),
                AttributeSpec::number("size"),
                AttributeSpec::string("src"),
                AttributeSpec::string("step"),
                AttributeSpec::enumeration(
                    "type",
                    &[
                        "button", "checkbox", "color", "date", "datetime-local", "email",
                        "file", "hidden", "image", "month", "number", "password", "radio",
                        "range", "reset", "search", "submit", "tel", "text", "time", "url",
                        "week",
                    ],
                ),
                AttributeSpec::string("value"),
            ])?,
        ElementSchema::new("keygen").empty(),
        ElementSchema::new("link").empty().with_attributes([
            AttributeSpec::string("as"),
            AttributeSpec::enumeration("crossorigin", CORS_SETTINGS),
            AttributeSpec::string("href"),
            AttributeSpec::string("hreflang"),
            AttributeSpec::string("integrity"),
            AttributeSpec::string("media"),
            AttributeSpec::enumeration("referrerpolicy", REFERRER_POLICIES),
            AttributeSpec::tokens("rel", LINK_TYPES),
            AttributeSpec::string("sizes"),
            AttributeSpec::string("type"),
        ])?,
        ElementSchema::new("meta").empty().with_attributes([
            AttributeSpec::string("charset"),
            AttributeSpec::string("content"),
            AttributeSpec::string("http-equiv"),
            AttributeSpec::string("name"),
        ])?,
        ElementSchema::new("param")
            .empty()
            .with_attributes([AttributeSpec::string("name"), AttributeSpec::string("value")])?,
        ElementSchema::new("source").empty().with_attributes([
            AttributeSpec::string("media"),
            AttributeSpec::string("sizes"),
            AttributeSpec::string("src"),
            AttributeSpec::string("srcset"),
            AttributeSpec::string("type"),
        ])?,
        ElementSchema::new("track").empty().with_attributes([
            AttributeSpec::boolean("default"),
            AttributeSpec::enumeration(
                "kind",
                &["subtitles", "captions", "descriptions", "chapters", "metadata"],
            ),
            AttributeSpec::string("label"),
            AttributeSpec::string("src"),
            AttributeSpec::string("srclang"),
        ])?,
        ElementSchema::new("wbr").empty(),
    ])
}

fn link_types() -> Vec<LinkType> {
    vec![
        LinkType::new("alternate", &[A, AREA, LINK])
            .describe("Alternate representation: stylesheet, feed, medium, language or format."),
        LinkType::new("archives", &[A, AREA, LINK])
            .deprecated()
            .describe("A document containing an archive link to this one."),
        LinkType::new("author", &[A, AREA, LINK])
            .describe("Information about, or a way to contact, the author."),
        LinkType::new("bookmark", &[A, AREA])
            .describe("Permalink for the nearest ancestor article or section."),
        LinkType::new("canonical", &[LINK]).describe("Preferred URL of the current document."),
        LinkType::new("dns-prefetch", &[LINK])
            .experimental()
            .describe("Resolve the target origin's DNS ahead of time."),
        LinkType::new("external", &[A, AREA, FORM])
            .describe("The target is outside the current site."),
        LinkType::new("first", &[A, AREA, LINK])
            .deprecated()
            .describe("First resource of the sequence this page is in."),
        LinkType::new("help", &[A, AREA, FORM, LINK]).describe("Context-sensitive help."),
        LinkType::new("icon", &[LINK]).describe("Icon representing the page."),
        LinkType::new("import", &[LINK])
            .experimental()
            .describe("HTML import of a web component bundle."),
        LinkType::new("index", &[A, AREA, LINK])
            .deprecated()
            .describe("Top-level resource of the hierarchy this page is in."),
        LinkType::new("last", &[A, AREA, LINK])
            .deprecated()
            .describe("Last resource of the sequence this page is in."),
        LinkType::new("license", &[A, AREA, FORM, LINK])
            .describe("Licensing information for the document."),
        LinkType::new("manifest", &[LINK]).describe("Web app manifest."),
        LinkType::new("modulepreload", &[LINK])
            .describe("Fetch module scripts early and at high priority."),
        LinkType::new("next", &[A, AREA, FORM, LINK])
            .describe("Next resource of the sequence this page is in."),
        LinkType::new("nofollow", &[A, AREA, FORM])
            .describe("The author does not endorse the target."),
        LinkType::new("noopener", &[A, AREA, FORM])
            .describe("Open the target without an opener reference."),
        LinkType::new("noreferrer", &[A, AREA, FORM])
            .describe("Do not send a Referer header when following the link."),
        LinkType::new("opener", &[A, AREA, FORM])
            .experimental()
            .describe("Keep the opener reference for target=_blank."),
        LinkType::new("pingback", &[LINK]).describe("Pingback server address."),
        LinkType::new("preconnect", &[LINK])
            .experimental()
            .describe("Open a connection to the target origin ahead of time."),
        LinkType::new("prefetch", &[LINK])
            .describe("Fetch a resource likely needed by a later navigation."),
        LinkType::new("preload", &[LINK])
            .describe("Fetch a resource needed by the current navigation."),
        LinkType::new("prerender", &[LINK])
            .experimental()
            .describe("Fetch and render the target offscreen."),
        LinkType::new("prev", &[A, AREA, FORM, LINK])
            .describe("Previous resource of the sequence this page is in."),
        LinkType::new("search", &[A, AREA, FORM, LINK])
            .describe("Search interface for this document or site."),
        LinkType::new("shortlink", &[LINK]).describe("Short URL for the document."),
        LinkType::new("sidebar", &[A, AREA, LINK])
            .deprecated()
            .describe("Open the target in a secondary browsing context."),
        LinkType::new("stylesheet", &[LINK]).describe("External stylesheet."),
        LinkType::new("tag", &[A, AREA])
            .describe("A tag that applies to the current document."),
        LinkType::new("up", &[A, AREA, LINK])
            .deprecated()
            .describe("Parent resource in the hierarchy this page is in."),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::schemas::SchemaTable;

    #[test]
    fn test_builtins_build() {
        let table = html_builder().unwrap().build().unwrap();

        assert_eq!(table.element_count(), 21);
        assert_eq!(table.global_attributes().len(), 39);
        assert_eq!(table.link_types().map(|v| v.len()), Some(33));
    }

    #[test]
    fn test_empty_elements_are_declared() {
        let table = SchemaTable::html().unwrap();
        for tag in EMPTY_ELEMENTS {
            let element = table.lookup_element(tag).unwrap();
            assert!(element.is_empty_element, "{} should be empty", tag);
        }
    }

    #[test]
    fn test_inlist_accepts_boolean_and_text() {
        use crate::validators::facets::{AttributeValue, ConstraintEvaluator};

        let table = SchemaTable::html().unwrap();
        let eval = ConstraintEvaluator::new(&table);
        let inlist = table.global_attributes().get("inlist").unwrap();

        for value in [
            AttributeValue::Bool(true),
            AttributeValue::Absent,
            AttributeValue::from(""),
            AttributeValue::from("anything"),
        ] {
            assert!(eval.evaluate(&inlist.constraint, &value, "a").is_satisfied(), "{}", value);
        }
    }

    #[test]
    fn test_deprecated_elements() {
        let table = SchemaTable::html().unwrap();
        assert!(table.lookup_element("acronym").unwrap().deprecated);
        assert!(table.lookup_element("applet").unwrap().deprecated);
        assert!(!table.lookup_element("abbr").unwrap().deprecated);
    }

    #[test]
    fn test_every_link_type_has_hosts() {
        let table = SchemaTable::html().unwrap();
        for entry in table.link_types().unwrap().iter() {
            assert!(!entry.hosts.is_empty(), "{} has no hosts", entry.token);
            for host in &entry.hosts {
                assert!(matches!(host.as_str(), A | AREA | FORM | LINK));
            }
        }
    }

    #[test]
    fn test_link_type_flags() {
        let table = SchemaTable::html().unwrap();

        for token in ["archives", "first", "index", "last", "sidebar", "up"] {
            assert!(table.lookup_link_type(token).unwrap().deprecated, "{}", token);
        }
        for token in ["dns-prefetch", "import", "opener", "preconnect", "prerender"] {
            assert!(table.lookup_link_type(token).unwrap().experimental, "{}", token);
        }
        assert!(!table.lookup_link_type("stylesheet").unwrap().deprecated);
    }
}
