//! 工具函数性能基准测试

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use shortly::services::extract_title;
use shortly::utils::url_validator::validate_url;
use shortly::utils::{generate_random_code, is_valid_short_code};

// ============== is_valid_short_code 基准测试 ==============

fn bench_is_valid_short_code(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/is_valid_short_code");

    group.bench_function("valid", |b| {
        b.iter(|| {
            assert!(is_valid_short_code("aB3xY9"));
        });
    });

    group.bench_function("invalid_path", |b| {
        b.iter(|| {
            assert!(!is_valid_short_code("favicon.ico"));
        });
    });

    group.bench_function("invalid_special_chars", |b| {
        b.iter(|| {
            assert!(!is_valid_short_code("'; DROP TABLE--"));
        });
    });

    let too_long_code = "a".repeat(65);
    group.bench_function("invalid_too_long", |b| {
        b.iter(|| {
            assert!(!is_valid_short_code(&too_long_code));
        });
    });

    group.finish();
}

// ============== generate_random_code 基准测试 ==============

fn bench_generate_random_code(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/generate_random_code");

    for length in [6, 8, 12, 20] {
        group.bench_with_input(BenchmarkId::new("length", length), &length, |b, &length| {
            b.iter(|| {
                let code = generate_random_code(length);
                assert_eq!(code.len(), length);
            });
        });
    }

    group.finish();
}

// ============== validate_url 基准测试 ==============

fn bench_validate_url(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/validate_url");

    group.bench_function("valid_http", |b| {
        b.iter(|| {
            assert!(validate_url("http://www.roflzoo.com/").is_ok());
        });
    });

    group.bench_function("valid_https_query", |b| {
        b.iter(|| {
            assert!(validate_url("https://example.com/path?query=1").is_ok());
        });
    });

    group.bench_function("invalid_not_a_url", |b| {
        b.iter(|| {
            assert!(validate_url("definitely not a valid url").is_err());
        });
    });

    group.bench_function("invalid_dangerous_protocol", |b| {
        b.iter(|| {
            assert!(validate_url("javascript:alert(1)").is_err());
        });
    });

    let long_url = format!("https://example.com/{}", "a".repeat(1000));
    group.bench_function("valid_long_url", |b| {
        b.iter(|| {
            assert!(validate_url(&long_url).is_ok());
        });
    });

    group.finish();
}

// ============== extract_title 基准测试 ==============

fn bench_extract_title(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/extract_title");

    let small = "<html><head><title>Roflzoo &amp; Friends</title></head></html>";
    group.bench_function("small_page", |b| {
        b.iter(|| {
            assert_eq!(extract_title(small).as_deref(), Some("Roflzoo & Friends"));
        });
    });

    // 标题出现在大量 head 内容之后
    let large = format!(
        "<html><head>{}<TITLE lang=\"en\">  Late\n  Title </TITLE></head></html>",
        "<meta name=\"x\" content=\"y\">".repeat(5000)
    );
    group.bench_function("large_head", |b| {
        b.iter(|| {
            assert_eq!(extract_title(&large).as_deref(), Some("Late Title"));
        });
    });

    let missing = "<html><body>".to_string() + &"<p>no title</p>".repeat(2000);
    group.bench_function("missing_title", |b| {
        b.iter(|| {
            assert!(extract_title(&missing).is_none());
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_is_valid_short_code,
    bench_generate_random_code,
    bench_validate_url,
    bench_extract_title,
);
criterion_main!(benches);
