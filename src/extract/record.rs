use serde::Serialize;

/// One product record extracted from a mirrored shop page
///
/// `product_name`, `price`, `drawer` and `image` are required; a page missing
/// any of them yields no record at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRecord {
    /// Text of the page's first `<h1>`
    pub product_name: String,

    /// Price as written on the page, e.g. `12,50 €`
    pub price: String,

    /// Drawer number from the `where: drawer <n>` text
    pub drawer: String,

    /// Main image path, from the inline `img.src = "..."` assignment or the
    /// first `<img class="test">` fallback
    pub image: String,

    /// Dimensions of the first `<canvas>`, when both attributes parse
    pub canvas_size: Option<CanvasSize>,

    /// Text of the first `<p>` after the canvas
    pub description: Option<String>,

    /// First drawing-arc call's leading arguments
    pub coordinates: Option<ArcCoordinates>,

    /// Every `<img class="test">` source other than the main image
    pub extra_images: Vec<String>,
}

/// Width and height of a `<canvas>` element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

/// Center and radius of a canvas arc call
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArcCoordinates {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}
