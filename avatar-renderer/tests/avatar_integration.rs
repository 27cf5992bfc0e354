//! Integration tests for avatar rendering and caching.
//!
//! Covers determinism, output dimensions, cache hit accounting and FIFO
//! eviction through the public renderer API.

use std::cell::Cell;

use avatar_renderer::{
    render, AvatarRenderer, CacheConfig, FifoCache, RenderConfig, RenderRequest, RenderResult,
    RenderedImage, DEFAULT_MAX_ENTRIES,
};
use proptest::prelude::*;
use uuid::Uuid;

const ID: &str = "9f1c2d3e-4b5a-6978-8a9b-0c1d2e3f4a5b";

/// Render through a plain cache, counting renders.
fn counted(
    cache: &mut FifoCache<RenderedImage>,
    renders: &Cell<usize>,
    request: &RenderRequest,
) -> RenderResult<RenderedImage> {
    cache.get_or_try_insert_with(&request.cache_key(), || {
        renders.set(renders.get() + 1);
        render(request)
    })
}

// ==========================================================================
// Determinism and dimensions
// ==========================================================================

#[test]
fn test_render_is_byte_identical() {
    let request = RenderRequest::new(ID, 48, 50).expect("request");
    let first = render(&request).expect("render");
    let second = render(&request).expect("render");
    assert_eq!(first.as_png(), second.as_png());
    assert_eq!(first.to_data_uri(), second.to_data_uri());
}

#[test]
fn test_output_dimensions_match_size() {
    for size in [16, 17, 31, 64, 100, 128, 255, 512] {
        let request = RenderRequest::new(ID, size, 50).expect("request");
        let image = render(&request).expect("render");
        assert_eq!((image.width(), image.height()), (size, size));

        let decoded = image.decode().expect("decode");
        assert_eq!((decoded.width, decoded.height), (size, size));
        assert_eq!(decoded.data.len(), (size * size * 4) as usize);
    }
}

#[test]
fn test_different_identifiers_differ() {
    let a = render(&RenderRequest::new(ID, 32, 50).expect("request")).expect("render");
    let b = render(
        &RenderRequest::new("550e8400-e29b-41d4-a716-446655440000", 32, 50).expect("request"),
    )
    .expect("render");
    assert_ne!(a.as_png(), b.as_png());
}

#[test]
fn test_png_signature() {
    let image = render(&RenderRequest::new(ID, 16, 50).expect("request")).expect("render");
    assert_eq!(&image.as_png()[0..4], &[137, 80, 78, 71]);
}

// ==========================================================================
// Cache behaviour
// ==========================================================================

#[test]
fn test_repeated_request_renders_once() {
    let mut cache = FifoCache::new();
    let renders = Cell::new(0);
    let request = RenderRequest::new(ID, 24, 50).expect("request");

    let first = counted(&mut cache, &renders, &request).expect("render");
    let second = counted(&mut cache, &renders, &request).expect("render");

    assert_eq!(renders.get(), 1);
    assert_eq!(first, second);
}

#[test]
fn test_distinct_sizes_and_budgets_are_distinct_entries() {
    let mut cache = FifoCache::new();
    let renders = Cell::new(0);

    for (size, iterations) in [(8, 50), (9, 50), (8, 51)] {
        let request = RenderRequest::new(ID, size, iterations).expect("request");
        counted(&mut cache, &renders, &request).expect("render");
    }

    assert_eq!(renders.get(), 3);
    assert_eq!(cache.len(), 3);
}

#[test]
fn test_eviction_drops_first_inserted() {
    let renderer = AvatarRenderer::new(RenderConfig::default(), CacheConfig::default());
    let ids: Vec<String> = (0..=DEFAULT_MAX_ENTRIES as u128)
        .map(|n| Uuid::from_u128(n).to_string())
        .collect();

    for id in &ids {
        renderer.get_or_render(id, 4, 10).expect("render");
    }

    let cache = renderer.cache();
    assert_eq!(cache.len(), DEFAULT_MAX_ENTRIES);

    let key = |id: &str| RenderRequest::new(id, 4, 10).expect("request").cache_key();
    assert!(!cache.contains(&key(&ids[0])));
    for id in &ids[1..] {
        assert!(cache.contains(&key(id)));
    }
    assert_eq!(renderer.stats().expect("stats").evictions, 1);
}

#[test]
fn test_evicted_entry_is_rendered_again() {
    let renderer = AvatarRenderer::new(RenderConfig::default(), CacheConfig { max_entries: 1 });
    let other = "00000000-0000-0000-0000-000000000001";

    let first = renderer.get_or_render(ID, 8, 20).expect("render");
    renderer.get_or_render(other, 8, 20).expect("render");
    let again = renderer.get_or_render(ID, 8, 20).expect("render");

    assert_eq!(first, again);
    assert_eq!(renderer.stats().expect("stats").loads, 3);
}

#[test]
fn test_case_variants_are_separate_entries() {
    let renderer = AvatarRenderer::default();
    let lower = renderer.get_or_render(ID, 8, 20).expect("render");
    let upper = renderer
        .get_or_render(&ID.to_uppercase(), 8, 20)
        .expect("render");

    // Same parameters, same pixels, but two cache keys.
    assert_eq!(lower.as_png(), upper.as_png());
    assert_eq!(renderer.cache().len(), 2);
}

// ==========================================================================
// Properties
// ==========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_render_deterministic_and_sized(bits in any::<u128>(), size in 1u32..24) {
        let id = Uuid::from_u128(bits).to_string();
        let request = RenderRequest::new(&id, size, 30).expect("request");
        let first = render(&request).expect("render");
        let second = render(&request).expect("render");
        prop_assert_eq!(first.as_png(), second.as_png());
        prop_assert_eq!(first.width(), size);
        prop_assert_eq!(first.height(), size);
    }
}
