/*
    Copyright 2025 MydriaTech AB

    Licensed under the Apache License 2.0 with Free world makers exception
    1.0.0 (the "License"); you may not use this file except in compliance with
    the License. You should have obtained a copy of the License with the source
    or binary distribution in file named

        LICENSE-Apache-2.0-with-FWM-Exception-1.0.0

    Unless required by applicable law or agreed to in writing, software
    distributed under the License is distributed on an "AS IS" BASIS,
    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
    See the License for the specific language governing permissions and
    limitations under the License.
*/

//! Minimal HTML rendering of JSON documents.

use serde_json::Value;

/// Renders JSON documents as nested HTML lists.
pub struct HtmlRenderer {}

impl HtmlRenderer {
    /// Return a complete HTML document showing the value.
    pub fn render_document(value: &Value) -> String {
        let mut html = String::from("<!DOCTYPE html><html><body>");
        Self::render(value, &mut html);
        html.push_str("</body></html>");
        html
    }

    fn render(value: &Value, html: &mut String) {
        match value {
            Value::Object(map) => {
                html.push_str("<ul>");
                for (key, value) in map {
                    html.push_str("<li><b>");
                    html.push_str(&Self::escape(key));
                    html.push_str("</b>: ");
                    Self::render(value, html);
                    html.push_str("</li>");
                }
                html.push_str("</ul>");
            }
            Value::Array(values) => {
                html.push_str("<ol>");
                for value in values {
                    html.push_str("<li>");
                    Self::render(value, html);
                    html.push_str("</li>");
                }
                html.push_str("</ol>");
            }
            Value::String(s) if s.starts_with("http://") || s.starts_with("https://") => {
                let s = Self::escape(s);
                html.push_str(&format!("<a href=\"{s}\">{s}</a>"));
            }
            Value::String(s) => html.push_str(&Self::escape(s)),
            other => html.push_str(&other.to_string()),
        }
    }

    /// Escape characters with special meaning in HTML.
    fn escape(s: &str) -> String {
        let mut ret = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '&' => ret.push_str("&amp;"),
                '<' => ret.push_str("&lt;"),
                '>' => ret.push_str("&gt;"),
                '"' => ret.push_str("&quot;"),
                '\'' => ret.push_str("&#39;"),
                c => ret.push(c),
            }
        }
        ret
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_escapes_content() {
        let html = HtmlRenderer::render_document(&json!({
            "name": "<script>alert('x')</script>",
            "self": "http://localhost:8080/beer/1",
            "alcoholPercentage": 6.5,
        }));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("<a href=\"http://localhost:8080/beer/1\">"));
        assert!(html.contains("6.5"));
    }
}
