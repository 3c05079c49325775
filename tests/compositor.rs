//! End-to-end compositor runs against an in-memory asset loader.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use image::{DynamicImage, Rgba, RgbaImage};
use pretty_assertions::assert_eq;

use drape::config::{DisplacementSettings, OutputFormat, OutputSettings};
use drape::geometry::{MockupPlacement, Point};
use drape::render::{AssetLoader, ComposeRequest, Compositor, Tint};
use drape::DrapeError;

const GRAY: Rgba<u8> = Rgba([128, 128, 128, 255]);
const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

#[derive(Default)]
struct MemoryLoader {
    images: HashMap<String, RgbaImage>,
}

impl MemoryLoader {
    fn with(mut self, url: &str, image: RgbaImage) -> Self {
        self.images.insert(url.to_string(), image);
        self
    }
}

#[async_trait]
impl AssetLoader for MemoryLoader {
    async fn load(&self, url: &str) -> Result<DynamicImage, DrapeError> {
        self.images
            .get(url)
            .cloned()
            .map(DynamicImage::ImageRgba8)
            .ok_or_else(|| DrapeError::Fetch(format!("no asset at {}", url)))
    }
}

fn compositor(loader: MemoryLoader) -> Compositor {
    Compositor::new(Arc::new(loader))
}

fn request(width: u32, height: u32) -> ComposeRequest {
    ComposeRequest {
        mockup_url: "garment".to_string(),
        design_url: "design".to_string(),
        output: OutputSettings {
            width,
            height,
            ..Default::default()
        },
        ..Default::default()
    }
}

fn decode(bytes: &[u8]) -> RgbaImage {
    image::load_from_memory(bytes).unwrap().to_rgba8()
}

fn close(a: Rgba<u8>, b: Rgba<u8>, tolerance: u8) -> bool {
    a.0.iter().zip(b.0.iter()).all(|(x, y)| x.abs_diff(*y) <= tolerance)
}

#[test_log::test(tokio::test)]
async fn test_default_placement_centered_on_garment() {
    let loader = MemoryLoader::default()
        .with("garment", RgbaImage::from_pixel(200, 100, GRAY))
        .with("design", RgbaImage::from_pixel(20, 20, RED));
    let compositor = compositor(loader);

    let rendered = compositor.compose(&request(100, 100)).await.unwrap();
    assert_eq!(rendered.format, OutputFormat::Png);
    assert_eq!((rendered.width, rendered.height), (100, 100));

    let out = decode(&rendered.bytes);
    assert_eq!(out.dimensions(), (100, 100));
    // Garment is contain-fit to 100x50 at y = 25; design is 50x50 centered
    assert!(close(*out.get_pixel(50, 50), RED, 2), "{:?}", out.get_pixel(50, 50));
    assert!(close(*out.get_pixel(10, 30), GRAY, 2), "{:?}", out.get_pixel(10, 30));
    assert_eq!(out.get_pixel(10, 10).0[3], 0);
    assert_eq!(out.get_pixel(90, 90).0[3], 0);
    assert_eq!(compositor.tracker().live(), 0);
    assert_eq!(compositor.tracker().issued(), 1);
}

#[tokio::test]
async fn test_missing_garment_fails_and_releases() {
    let loader = MemoryLoader::default().with("design", RgbaImage::from_pixel(4, 4, RED));
    let compositor = compositor(loader);

    let err = compositor.compose(&request(64, 64)).await.unwrap_err();
    assert!(matches!(err, DrapeError::Fetch(_)));
    assert_eq!(compositor.tracker().live(), 0);
    assert_eq!(compositor.tracker().issued(), 1);
}

#[tokio::test]
async fn test_missing_design_fails_and_releases() {
    let loader = MemoryLoader::default().with("garment", RgbaImage::from_pixel(4, 4, GRAY));
    let compositor = compositor(loader);

    assert!(compositor.compose(&request(64, 64)).await.is_err());
    assert_eq!(compositor.tracker().live(), 0);
}

#[tokio::test]
async fn test_invalid_output_rejected_before_loading() {
    let compositor = compositor(MemoryLoader::default());
    let err = compositor.compose(&request(0, 64)).await.unwrap_err();
    assert!(matches!(err, DrapeError::InvalidSettings(_)));
    assert_eq!(compositor.tracker().issued(), 0);
}

#[tokio::test]
async fn test_jpeg_output() {
    let loader = MemoryLoader::default()
        .with("garment", RgbaImage::from_pixel(50, 50, GRAY))
        .with("design", RgbaImage::from_pixel(10, 10, RED));
    let mut req = request(80, 60);
    req.output.format = OutputFormat::Jpeg;
    req.output.quality = 0.9;

    let rendered = compositor(loader).compose(&req).await.unwrap();
    assert_eq!(&rendered.bytes[..2], &[0xFF, 0xD8]);
    assert!(rendered.to_data_url().starts_with("data:image/jpeg;base64,"));
    let out = decode(&rendered.bytes);
    assert_eq!(out.dimensions(), (80, 60));
    // Transparent stage edges are flattened onto white
    assert!(close(*out.get_pixel(2, 30), Rgba([255, 255, 255, 255]), 6));
}

#[tokio::test]
async fn test_tint_multiplies_garment() {
    let loader = MemoryLoader::default()
        .with("garment", RgbaImage::from_pixel(40, 40, Rgba([255, 255, 255, 255])))
        .with("design", RgbaImage::from_pixel(4, 4, RED));
    let mut req = request(40, 40);
    req.tint = Some(Tint([0, 0, 255]));
    req.displacement.enabled = false;

    let out = decode(&compositor(loader).compose(&req).await.unwrap().bytes);
    assert!(close(*out.get_pixel(2, 2), Rgba([0, 0, 255, 255]), 1));
    assert!(close(*out.get_pixel(20, 20), RED, 1));
}

#[tokio::test]
async fn test_placement_with_clip_polygon() {
    let loader = MemoryLoader::default()
        .with("garment", RgbaImage::from_pixel(100, 100, GRAY))
        .with("design", RgbaImage::from_pixel(10, 10, RED));
    let mut req = request(100, 100);
    req.displacement = DisplacementSettings {
        enabled: false,
        ..Default::default()
    };
    req.placement = Some(MockupPlacement {
        x: 20.0,
        y: 20.0,
        width: 60.0,
        height: 60.0,
        rotation_deg: 0.0,
        clip_polygon: Some(vec![
            Point::new(20.0, 20.0),
            Point::new(50.0, 20.0),
            Point::new(50.0, 80.0),
            Point::new(20.0, 80.0),
        ]),
    });

    let out = decode(&compositor(loader).compose(&req).await.unwrap().bytes);
    assert!(close(*out.get_pixel(30, 50), RED, 1));
    assert!(close(*out.get_pixel(70, 50), GRAY, 1));
    assert!(close(*out.get_pixel(10, 50), GRAY, 1));
}

#[tokio::test]
async fn test_flat_garment_displacement_is_identity() {
    let loader = MemoryLoader::default()
        .with("garment", RgbaImage::from_pixel(100, 100, GRAY))
        .with("design", RgbaImage::from_pixel(10, 10, RED));
    let placement = MockupPlacement {
        x: 20.0,
        y: 20.0,
        width: 60.0,
        height: 60.0,
        ..Default::default()
    };
    let compositor = compositor(loader);

    let mut flat = request(100, 100);
    flat.placement = Some(placement.clone());
    flat.displacement.enabled = false;
    let mut warped = flat.clone();
    warped.displacement.enabled = true;

    let flat = decode(&compositor.compose(&flat).await.unwrap().bytes);
    let warped = decode(&compositor.compose(&warped).await.unwrap().bytes);
    assert_eq!(flat, warped);
}

#[tokio::test]
async fn test_concurrent_composites_isolated() {
    let loader = MemoryLoader::default()
        .with("garment", RgbaImage::from_pixel(60, 60, GRAY))
        .with("design", RgbaImage::from_pixel(6, 6, RED));
    let compositor = compositor(loader);

    let mut handles = Vec::new();
    for size in [32u32, 48, 64, 80] {
        let compositor = compositor.clone();
        handles.push(tokio::spawn(async move {
            compositor.compose(&request(size, size)).await
        }));
    }
    for (handle, size) in handles.into_iter().zip([32u32, 48, 64, 80]) {
        let rendered = handle.await.unwrap().unwrap();
        assert_eq!((rendered.width, rendered.height), (size, size));
    }
    assert_eq!(compositor.tracker().live(), 0);
    assert_eq!(compositor.tracker().issued(), 4);
}

#[tokio::test]
async fn test_request_from_editor_json() {
    let loader = MemoryLoader::default()
        .with("garment", RgbaImage::from_pixel(30, 30, GRAY))
        .with("design", RgbaImage::from_pixel(3, 3, RED));
    let req: ComposeRequest = serde_json::from_str(
        r##"{
            "mockupUrl": "garment",
            "designUrl": "design",
            "tint": "#ffffff",
            "displacement": { "horizontalStrength": 5 },
            "output": { "width": 30, "height": 30, "format": "jpeg" }
        }"##,
    )
    .unwrap();
    assert!(req.displacement.enabled);
    assert_eq!(req.displacement.vertical_strength, 20.0);

    let rendered = compositor(loader).compose(&req).await.unwrap();
    assert_eq!(rendered.format, OutputFormat::Jpeg);
    assert_eq!((rendered.width, rendered.height), (30, 30));
}

#[tokio::test]
async fn test_unusable_displacement_composites_flat() {
    let loader = MemoryLoader::default()
        .with("garment", RgbaImage::from_fn(60, 60, |x, _| Rgba([(x * 4) as u8, 90, 200, 255])))
        .with("design", RgbaImage::from_pixel(6, 6, RED));
    let compositor = compositor(loader);

    let mut flat = request(60, 60);
    flat.displacement.enabled = false;
    let mut broken = request(60, 60);
    broken.displacement.horizontal_strength = f32::INFINITY;

    let flat = decode(&compositor.compose(&flat).await.unwrap().bytes);
    let broken = decode(&compositor.compose(&broken).await.unwrap().bytes);
    assert_eq!(flat, broken);
    assert_eq!(compositor.tracker().live(), 0);
}

#[tokio::test]
async fn test_oversized_output_rejected_without_panic() {
    let loader = MemoryLoader::default()
        .with("garment", RgbaImage::from_pixel(4, 4, GRAY))
        .with("design", RgbaImage::from_pixel(4, 4, RED));
    let compositor = compositor(loader);

    let err = compositor
        .compose(&request(u32::MAX, u32::MAX))
        .await
        .unwrap_err();
    assert!(matches!(err, DrapeError::InvalidSettings(_)));
    assert_eq!(compositor.tracker().issued(), 0);
    assert_eq!(compositor.tracker().live(), 0);
}
