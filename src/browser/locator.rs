//! Locator to JavaScript translation
//!
//! Every page interaction is a small script evaluated in the page. Strings
//! are embedded as JSON literals so quotes in selectors or values stay inert.

use crate::models::Locator;

fn js_string(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

/// Case-insensitive, whitespace-collapsed form used for text matching
fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Expression evaluating to the located element or `null`.
///
/// Text locators resolve to the innermost element whose rendered text
/// contains the needle, ignoring case and runs of whitespace.
pub fn element_expr(locator: &Locator) -> String {
    match locator {
        Locator::Css(selector) => format!("document.querySelector({})", js_string(selector)),
        Locator::XPath(path) => format!(
            "document.evaluate({}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue",
            js_string(path)
        ),
        Locator::Text(text) => format!(
            "(() => {{ \
                const skip = new Set(['SCRIPT', 'STYLE', 'NOSCRIPT']); \
                const norm = (s) => s.replace(/\\s+/g, ' ').trim().toLowerCase(); \
                const text = (el) => {{ \
                    let out = ''; \
                    for (const n of el.childNodes) {{ \
                        if (n.nodeType === Node.TEXT_NODE) out += n.textContent; \
                        else if (n.nodeType === Node.ELEMENT_NODE && !skip.has(n.tagName)) out += text(n); \
                    }} \
                    return out; \
                }}; \
                const needle = {}; \
                let el = document.body; \
                if (!el || !norm(text(el)).includes(needle)) return null; \
                descend: while (true) {{ \
                    for (const child of el.children) {{ \
                        if (!skip.has(child.tagName) && norm(text(child)).includes(needle)) {{ \
                            el = child; \
                            continue descend; \
                        }} \
                    }} \
                    return el; \
                }} \
            }})()",
            js_string(&normalize_text(text))
        ),
    }
}

/// Script returning whether the element exists and is rendered
pub fn visible_script(locator: &Locator) -> String {
    format!(
        "(() => {{ \
            const el = {}; \
            if (!el) return false; \
            const style = window.getComputedStyle(el); \
            if (style.visibility === 'hidden' || style.display === 'none') return false; \
            const rect = el.getBoundingClientRect(); \
            return rect.width > 0 && rect.height > 0; \
        }})()",
        element_expr(locator)
    )
}

/// Script replacing an input's value the way a user edit would.
///
/// Uses the native value setter so framework-controlled inputs see the
/// change, then fires `input` and `change`. Returns `false` when the element
/// is missing.
pub fn fill_script(locator: &Locator, value: &str) -> String {
    format!(
        "(() => {{ \
            const el = {}; \
            if (!el) return false; \
            el.focus(); \
            const proto = el instanceof HTMLTextAreaElement \
                ? HTMLTextAreaElement.prototype \
                : HTMLInputElement.prototype; \
            const setter = Object.getOwnPropertyDescriptor(proto, 'value').set; \
            setter.call(el, {}); \
            el.dispatchEvent(new Event('input', {{ bubbles: true }})); \
            el.dispatchEvent(new Event('change', {{ bubbles: true }})); \
            return true; \
        }})()",
        element_expr(locator),
        js_string(value)
    )
}

/// Script clicking the element; `false` when it is missing
pub fn click_script(locator: &Locator) -> String {
    format!(
        "(() => {{ \
            const el = {}; \
            if (!el) return false; \
            el.scrollIntoView({{ block: 'center' }}); \
            el.click(); \
            return true; \
        }})()",
        element_expr(locator)
    )
}

/// Script returning whether the page body text contains the string
pub fn text_present_script(text: &str) -> String {
    format!(
        "(() => !!document.body && document.body.innerText.includes({}))()",
        js_string(text)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_expression() {
        let expr = element_expr(&Locator::css("input[type=\"email\"]"));
        assert_eq!(expr, r#"document.querySelector("input[type=\"email\"]")"#);
    }

    #[test]
    fn test_xpath_expression() {
        let expr = element_expr(&Locator::xpath("/html/body/div[2]/form/button"));
        assert!(expr.starts_with(r#"document.evaluate("/html/body/div[2]/form/button""#));
        assert!(expr.contains("FIRST_ORDERED_NODE_TYPE"));
    }

    #[test]
    fn test_text_is_escaped() {
        let expr = element_expr(&Locator::text("say \"hi\""));
        assert!(expr.contains(r#"const needle = "say \"hi\"";"#));
    }

    #[test]
    fn test_text_needle_is_normalized() {
        let expr = element_expr(&Locator::text("  Verification\n  code "));
        assert!(expr.contains(r#"const needle = "verification code";"#));
        assert!(expr.contains("toLowerCase()"));
    }

    #[test]
    fn test_text_skips_script_content() {
        let expr = element_expr(&Locator::text("Enter a valid email"));
        assert!(expr.contains("'SCRIPT', 'STYLE', 'NOSCRIPT'"));
        assert!(expr.contains(r#"const needle = "enter a valid email";"#));
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("Enter a  valid\tEmail"), "enter a valid email");
        assert_eq!(normalize_text("6-digit"), "6-digit");
    }

    #[test]
    fn test_fill_embeds_value_as_literal() {
        let script = fill_script(&Locator::css("#email"), "a'b\"c");
        assert!(script.contains(r#"setter.call(el, "a'b\"c")"#));
        assert!(script.contains("new Event('input'"));
    }

    #[test]
    fn test_text_present_script() {
        let script = text_present_script("Application error");
        assert!(script.contains(r#"innerText.includes("Application error")"#));
    }
}
