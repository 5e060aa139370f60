use criterion::{criterion_group, criterion_main, Criterion};
use ircore::normalizer::{query_terms, tokenize};
use ircore::{NormalizerConfig, SpellCorrector};

const ABSTRACT: &str = "an experimental study of a wing in a propeller slipstream was made \
in order to determine the spanwise distribution of the lift increase due to slipstream at \
different angles of attack of the wing and at different free stream to slipstream velocity \
ratios . the results were intended in part as an evaluation basis for different theoretical \
treatments of this problem .";

fn bench_normalize(c: &mut Criterion) {
    let config = NormalizerConfig::english();
    c.bench_function("tokenize_abstract", |b| b.iter(|| tokenize(&config, ABSTRACT)));

    let spelled = NormalizerConfig::english().with_speller(SpellCorrector::from_text(ABSTRACT));
    c.bench_function("query_terms_misspelled", |b| {
        b.iter(|| query_terms(&spelled, "slipstreem propeler wing lift distribtion"))
    });
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
