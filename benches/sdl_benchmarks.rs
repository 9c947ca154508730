use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sdl_core::lexer::Lexer;
use sdl_core::{parse_str, parser::Parser};
use std::io::Cursor;

// ============================================================================
// Test Data: Varying Complexity and Size
// ============================================================================

const TINY_SDL: &str = "value 42\n";

const SMALL_SDL: &str = r#"name "test"
version 1.0
enabled true
tags "a" "b" "c"
"#;

const MEDIUM_SDL: &str = r#"server "web-1" region="eu" {
    port 8080
    tls on cert="/etc/ssl/web.pem"
    limits {
        max-connections 1000
        timeout 00:00:30
    }
}
server "web-2" region="us" {
    port 8081
    tls off
}
deployed 2023/05/12 14:32:00-GMT+00:00
payload [aGVsbG8gd29ybGQ=]
"#;

const LARGE_SDL: &str = r#"catalog {
    book "The Hobbit" isbn="978-0" pages=310 {
        author "J. R. R. Tolkien"
        published 1937/09/21
        price 11.99BD
    }
    book "Dune" isbn="978-1" pages=412 {
        author "Frank Herbert"
        published 1965/08/01
        price 12.50BD
    }
    book "Neuromancer" isbn="978-2" pages=271 {
        author "William Gibson"
        published 1984/07/01
        price 9.99BD
    }
}
schedule {
    backup 01:30:00 retention=30
    cleanup 03:00:00 retention=7
    report 5d:00:00:00
}
notes `multi
line
text`
"#;

// Generate very large SDL for stress testing
fn generate_xlarge_sdl(tag_count: usize) -> String {
    let mut sdl = String::from("items {\n");
    for i in 0..tag_count {
        sdl.push_str(&format!(
            "    item {i} name=\"Item {i}\" value={} active={}\n",
            i * 100,
            i % 2 == 0
        ));
    }
    sdl.push_str("}\n");
    sdl
}

fn lex_all(source: &str) -> usize {
    let mut lexer = Lexer::new(Cursor::new(source));
    let mut count = 0;
    while let Some(tokens) = lexer.next_token_line().unwrap() {
        count += tokens.len();
    }
    count
}

// ============================================================================
// Lexer Benchmarks
// ============================================================================

fn bench_lexer_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_by_size");

    for (name, source) in [
        ("tiny", TINY_SDL),
        ("small", SMALL_SDL),
        ("medium", MEDIUM_SDL),
        ("large", LARGE_SDL),
    ] {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), source, |b, src| {
            b.iter(|| lex_all(black_box(src)))
        });
    }

    group.finish();
}

// ============================================================================
// Parser Benchmarks
// ============================================================================

fn bench_parser_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_by_size");

    for (name, source) in [
        ("tiny", TINY_SDL),
        ("small", SMALL_SDL),
        ("medium", MEDIUM_SDL),
        ("large", LARGE_SDL),
    ] {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), source, |b, src| {
            b.iter(|| Parser::new(Cursor::new(black_box(src))).parse())
        });
    }

    group.finish();
}

fn bench_parser_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_tag_scaling");

    for size in [10, 50, 100, 500, 1000] {
        let source = generate_xlarge_sdl(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &source, |b, src| {
            b.iter(|| Parser::new(Cursor::new(black_box(src.as_str()))).parse())
        });
    }

    group.finish();
}

// ============================================================================
// End-to-End Benchmarks
// ============================================================================

fn bench_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("round_trip");

    for (name, source) in [("medium", MEDIUM_SDL), ("large", LARGE_SDL)] {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), source, |b, src| {
            b.iter(|| {
                let root = parse_str(black_box(src)).unwrap();
                root.children_to_sdl()
            })
        });
    }

    group.finish();
}

fn bench_e2e_with_json(c: &mut Criterion) {
    c.bench_function("e2e_with_json_serialization", |b| {
        b.iter(|| {
            let root = parse_str(black_box(LARGE_SDL)).unwrap();
            root.to_json()
        })
    });
}

criterion_group!(lexer_benches, bench_lexer_sizes);
criterion_group!(parser_benches, bench_parser_sizes, bench_parser_scaling);
criterion_group!(e2e_benches, bench_round_trip, bench_e2e_with_json);

criterion_main!(lexer_benches, parser_benches, e2e_benches);
