//! Field extraction from a single mirrored page
//!
//! The shop pages mix structured markup with inline scripts, so extraction
//! combines CSS selection (h1, canvas, img.test) with text patterns over the
//! raw document and its inline scripts (price, drawer, img.src, arc calls).

use crate::extract::record::{ArcCoordinates, CanvasSize, ProductRecord};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;

fn price_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)price:\s*([\d.,]+ ?€)").unwrap())
}

fn drawer_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)where:\s*drawer\s*(\d+)").unwrap())
}

fn img_src_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"img\.src\s*=\s*"([^"]+)""#).unwrap())
}

fn arc_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\.arc\s*\(\s*([\d.]+)\s*,\s*([\d.]+)\s*,\s*([\d.]+)\s*,").unwrap()
    })
}

/// Extracts a product record from one page's HTML
///
/// Returns None when the page is missing any of the required fields
/// (product name, price, drawer, main image); such pages are not products.
pub fn extract_product(html: &str) -> Option<ProductRecord> {
    let document = Html::parse_document(html);

    let product_name = first_h1_text(&document)?;
    let price = price_re()
        .captures(html)
        .map(|c| c[1].trim().to_string())?;
    let drawer = drawer_re().captures(html).map(|c| c[1].to_string())?;

    let scripts = inline_scripts(&document);
    let image = scripts
        .iter()
        .find_map(|s| img_src_re().captures(s).map(|c| c[1].trim().to_string()))
        .or_else(|| first_test_img_src(&document))?;

    let canvas_size = canvas_size(&document);
    let description = first_p_after_canvas(&document);
    let coordinates = scripts.iter().find_map(|s| parse_arc(s));
    let extra_images = test_img_sources(&document)
        .into_iter()
        .filter(|src| *src != image)
        .collect();

    Some(ProductRecord {
        product_name,
        price,
        drawer,
        image,
        canvas_size,
        description,
        coordinates,
        extra_images,
    })
}

fn first_h1_text(document: &Html) -> Option<String> {
    let selector = Selector::parse("h1").ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn canvas_size(document: &Html) -> Option<CanvasSize> {
    let selector = Selector::parse("canvas").ok()?;
    let canvas = document.select(&selector).next()?;
    let width = canvas.value().attr("width")?.trim().parse().ok()?;
    let height = canvas.value().attr("height")?.trim().parse().ok()?;
    Some(CanvasSize { width, height })
}

/// Collects the text content of every inline `<script>` element
fn inline_scripts(document: &Html) -> Vec<String> {
    match Selector::parse("script") {
        Ok(selector) => document
            .select(&selector)
            .map(|el| el.text().collect::<String>())
            .collect(),
        Err(_) => Vec::new(),
    }
}

fn first_test_img_src(document: &Html) -> Option<String> {
    let selector = Selector::parse("img.test").ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("src"))
        .map(str::to_string)
}

fn test_img_sources(document: &Html) -> Vec<String> {
    match Selector::parse("img.test") {
        Ok(selector) => document
            .select(&selector)
            .filter_map(|el| el.value().attr("src"))
            .map(str::to_string)
            .collect(),
        Err(_) => Vec::new(),
    }
}

/// Finds the first `<p>` following the first `<canvas>` in document order
fn first_p_after_canvas(document: &Html) -> Option<String> {
    let canvas_selector = Selector::parse("canvas").ok()?;
    let canvas_id = document.select(&canvas_selector).next()?.id();

    let mut past_canvas = false;
    for node in document.tree.root().descendants() {
        if node.id() == canvas_id {
            past_canvas = true;
            continue;
        }
        if !past_canvas {
            continue;
        }
        if let Some(element) = ElementRef::wrap(node) {
            if element.value().name() == "p" {
                let text = element.text().collect::<String>().trim().to_string();
                if !text.is_empty() {
                    return Some(text);
                }
            }
        }
    }
    None
}

fn parse_arc(script: &str) -> Option<ArcCoordinates> {
    let captures = arc_re().captures(script)?;
    Some(ArcCoordinates {
        x: captures[1].parse().ok()?,
        y: captures[2].parse().ok()?,
        radius: captures[3].parse().ok()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_PAGE: &str = r#"<html>
<head><title>Widget</title></head>
<body>
  <h1>Precision Widget</h1>
  <p>price: 12,50 €</p>
  <p>where: drawer 42</p>
  <canvas id="c" width="300" height="200"></canvas>
  <p>A very precise widget for lab work.</p>
  <img class="test" src="img/widget-side.png">
  <img class="test" src="img/widget-top.png">
  <script>
    const img = new Image();
    img.src = "img/widget.png";
    const ctx = document.getElementById("c").getContext("2d");
    ctx.arc(150.5, 100, 40.25, 0, 2 * Math.PI);
  </script>
</body>
</html>"#;

    #[test]
    fn test_extract_full_record() {
        let record = extract_product(FULL_PAGE).expect("page should yield a record");

        assert_eq!(record.product_name, "Precision Widget");
        assert_eq!(record.price, "12,50 €");
        assert_eq!(record.drawer, "42");
        assert_eq!(record.image, "img/widget.png");
        assert_eq!(
            record.canvas_size,
            Some(CanvasSize {
                width: 300,
                height: 200
            })
        );
        assert_eq!(
            record.description.as_deref(),
            Some("A very precise widget for lab work.")
        );
        assert_eq!(
            record.coordinates,
            Some(ArcCoordinates {
                x: 150.5,
                y: 100.0,
                radius: 40.25
            })
        );
        assert_eq!(
            record.extra_images,
            vec!["img/widget-side.png", "img/widget-top.png"]
        );
    }

    #[test]
    fn test_missing_product_name_skips_record() {
        let html = FULL_PAGE.replace("<h1>Precision Widget</h1>", "");
        assert!(extract_product(&html).is_none());
    }

    #[test]
    fn test_missing_price_skips_record() {
        let html = FULL_PAGE.replace("price: 12,50 €", "no price listed");
        assert!(extract_product(&html).is_none());
    }

    #[test]
    fn test_missing_drawer_skips_record() {
        let html = FULL_PAGE.replace("where: drawer 42", "location unknown");
        assert!(extract_product(&html).is_none());
    }

    #[test]
    fn test_image_falls_back_to_test_img() {
        let html = FULL_PAGE.replace(r#"img.src = "img/widget.png";"#, "");
        let record = extract_product(&html).expect("fallback image should apply");
        assert_eq!(record.image, "img/widget-side.png");
        // The fallback image is no longer an extra
        assert_eq!(record.extra_images, vec!["img/widget-top.png"]);
    }

    #[test]
    fn test_no_image_at_all_skips_record() {
        let html = FULL_PAGE
            .replace(r#"img.src = "img/widget.png";"#, "")
            .replace(r#"<img class="test" src="img/widget-side.png">"#, "")
            .replace(r#"<img class="test" src="img/widget-top.png">"#, "");
        assert!(extract_product(&html).is_none());
    }

    #[test]
    fn test_optional_fields_may_be_absent() {
        let html = r#"<html><body>
            <h1>Bare Widget</h1>
            price: 3 €
            where: drawer 7
            <script>img.src = "bare.png";</script>
        </body></html>"#;

        let record = extract_product(html).unwrap();
        assert_eq!(record.canvas_size, None);
        assert_eq!(record.description, None);
        assert_eq!(record.coordinates, None);
        assert!(record.extra_images.is_empty());
    }

    #[test]
    fn test_canvas_with_non_numeric_size_is_ignored() {
        let html = FULL_PAGE.replace(r#"width="300" height="200""#, r#"width="auto" height="200""#);
        let record = extract_product(&html).unwrap();
        assert_eq!(record.canvas_size, None);
    }

    #[test]
    fn test_price_match_is_case_insensitive() {
        let html = FULL_PAGE.replace("price: 12,50 €", "PRICE: 12,50 €");
        let record = extract_product(&html).unwrap();
        assert_eq!(record.price, "12,50 €");
    }

    #[test]
    fn test_description_requires_canvas() {
        let html = FULL_PAGE.replace(r#"<canvas id="c" width="300" height="200"></canvas>"#, "");
        let record = extract_product(&html).unwrap();
        assert_eq!(record.description, None);
    }

    #[test]
    fn test_only_first_arc_call_is_taken() {
        let html = FULL_PAGE.replace(
            "ctx.arc(150.5, 100, 40.25, 0, 2 * Math.PI);",
            "ctx.arc(1, 2, 3, 0, 1);\n    ctx.arc(9, 9, 9, 0, 1);",
        );
        let record = extract_product(&html).unwrap();
        assert_eq!(
            record.coordinates,
            Some(ArcCoordinates {
                x: 1.0,
                y: 2.0,
                radius: 3.0
            })
        );
    }
}
