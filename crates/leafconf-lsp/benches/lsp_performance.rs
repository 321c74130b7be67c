//! LSP performance benchmarks
//!
//! Every request reparses the document, so these measure the full
//! parse + analysis path on generated configurations.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;
use leafconf_lsp::config::Settings;
use leafconf_lsp::{CompletionEngine, NavigationAnalyzer, SymbolAnalyzer};
use tower_lsp::lsp_types::{Position, Url};

/// Generate a configuration with `proxy_count` proxies, one group per ten
/// proxies and a rule per proxy
fn generate_config(proxy_count: usize) -> String {
    let mut content = String::from(
        "[General]\nloglevel = info\ndns-server = 1.1.1.1, 8.8.8.8\ninterface = 0.0.0.0\nport = 1087\n\n[Proxy]\nDirect = direct\nReject = reject\n",
    );

    for i in 0..proxy_count {
        content.push_str(&format!(
            "SS-{:04} = shadowsocks, 10.0.{}.{}, {}, encrypt-method=aes-256-gcm, password=secret\n",
            i,
            i / 250,
            i % 250 + 1,
            8000 + i
        ));
    }

    content.push_str("\n[Proxy Group]\n");
    for g in 0..proxy_count.div_ceil(10) {
        let members: Vec<String> = (g * 10..((g + 1) * 10).min(proxy_count))
            .map(|i| format!("SS-{:04}", i))
            .collect();
        content.push_str(&format!(
            "Group-{:03} = failover, {}, health-check=true, last-resort=Direct\n",
            g,
            members.join(", ")
        ));
    }

    content.push_str("\n[Rule]\n");
    for i in 0..proxy_count {
        content.push_str(&format!("DOMAIN-SUFFIX, site{}.example, SS-{:04}\n", i, i));
    }
    content.push_str("FINAL, Direct\n");

    content
}

/// Benchmark full validation
fn bench_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("validation");
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(3));

    for count in [50, 250, 1000] {
        group.bench_with_input(BenchmarkId::new("proxies", count), &count, |b, &count| {
            let text = generate_config(count);
            b.iter(|| {
                let diagnostics = leafconf_validate::validate(black_box(&text));
                black_box(diagnostics)
            });
        });
    }

    group.finish();
}

/// Benchmark editor queries on a large document
fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    let text = generate_config(250);
    let last_line = text.lines().count() as u32 - 1;
    let uri = Url::parse("file:///bench/leaf.conf").unwrap();

    group.bench_function("rule_target_completion", |b| {
        let engine = CompletionEngine::new();
        b.iter(|| {
            let items = engine.get_completions(black_box(&text), Position::new(last_line, 7));
            black_box(items)
        });
    });

    group.bench_function("document_symbols", |b| {
        b.iter(|| {
            let symbols = SymbolAnalyzer::extract_symbols(black_box(&text));
            black_box(symbols)
        });
    });

    group.bench_function("references", |b| {
        b.iter(|| {
            let analyzer = NavigationAnalyzer::new(black_box(&text));
            black_box(analyzer.references(&uri, Position::new(last_line, 8), true))
        });
    });

    group.finish();
}

/// Benchmark settings parsing and filtering
fn bench_configuration(c: &mut Criterion) {
    let mut group = c.benchmark_group("configuration");
    group.warm_up_time(Duration::from_millis(100));
    group.measurement_time(Duration::from_secs(1));

    let toml_content = r#"
[diagnostics]
enabled = true
missing_final = "error"
info_notes = false

[completion]
snippets = false
"#;

    group.bench_function("parse_settings", |b| {
        b.iter(|| {
            let settings = Settings::from_toml_str(black_box(toml_content)).unwrap();
            black_box(settings)
        });
    });

    group.bench_function("apply_settings", |b| {
        let settings = Settings::from_toml_str(toml_content).unwrap();
        let diagnostics = leafconf_validate::validate(&generate_config(250));
        b.iter(|| black_box(settings.apply(black_box(diagnostics.clone()))));
    });

    group.finish();
}

criterion_group!(benches, bench_validation, bench_queries, bench_configuration);
criterion_main!(benches);
