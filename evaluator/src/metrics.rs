use ircore::DocId;
use serde::Serialize;

/// DCG@k with binary gains: a relevant document at rank r (1-based)
/// contributes `1 / log2(r + 1)`.
fn dcg_at_k(gains: &[f64], k: usize) -> f64 {
    gains
        .iter()
        .take(k)
        .enumerate()
        .map(|(i, g)| g / ((i + 2) as f64).log2())
        .sum()
}

/// nDCG@k of a ranked list against the set of relevant documents.
pub fn ndcg_at_k(ranked: &[DocId], relevant: &[DocId], k: usize) -> f64 {
    let gains: Vec<f64> = ranked
        .iter()
        .take(k)
        .map(|id| if relevant.contains(id) { 1.0 } else { 0.0 })
        .collect();
    let ideal = vec![1.0; relevant.len().min(k)];
    let idcg = dcg_at_k(&ideal, k);
    if idcg < 1e-10 {
        0.0
    } else {
        dcg_at_k(&gains, k) / idcg
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Wilcoxon {
    /// Pairs with a non-zero difference.
    pub n: usize,
    pub w_plus: f64,
    pub w_minus: f64,
    pub z: f64,
    /// Two-sided, normal approximation with tie correction.
    pub p_value: f64,
}

/// Wilcoxon signed-rank test on paired samples `a[i]` vs `b[i]`.
pub fn wilcoxon_signed_rank(a: &[f64], b: &[f64]) -> Wilcoxon {
    let mut diffs: Vec<f64> = a
        .iter()
        .zip(b)
        .map(|(x, y)| x - y)
        .filter(|d| d.abs() > 1e-12)
        .collect();
    diffs.sort_by(|x, y| x.abs().total_cmp(&y.abs()));

    let n = diffs.len();
    let (mut w_plus, mut w_minus, mut tie_term) = (0.0, 0.0, 0.0);
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && (diffs[j + 1].abs() - diffs[i].abs()).abs() <= 1e-12 {
            j += 1;
        }
        // ranks i+1 ..= j+1 share their average
        let rank = (i + j + 2) as f64 / 2.0;
        for d in &diffs[i..=j] {
            if *d > 0.0 {
                w_plus += rank;
            } else {
                w_minus += rank;
            }
        }
        let t = (j - i + 1) as f64;
        tie_term += t * t * t - t;
        i = j + 1;
    }

    if n == 0 {
        return Wilcoxon { n, w_plus, w_minus, z: 0.0, p_value: 1.0 };
    }
    let nf = n as f64;
    let mean = nf * (nf + 1.0) / 4.0;
    let variance = nf * (nf + 1.0) * (2.0 * nf + 1.0) / 24.0 - tie_term / 48.0;
    if variance <= 0.0 {
        return Wilcoxon { n, w_plus, w_minus, z: 0.0, p_value: 1.0 };
    }
    let z = (w_plus - mean) / variance.sqrt();
    let p_value = erfc(z.abs() / std::f64::consts::SQRT_2).min(1.0);
    Wilcoxon { n, w_plus, w_minus, z, p_value }
}

pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        0.0
    } else {
        xs.iter().sum::<f64>() / xs.len() as f64
    }
}

/// Complementary error function, Numerical Recipes `erfcc` (|error| < 1.2e-7).
fn erfc(x: f64) -> f64 {
    let z = x.abs();
    let t = 1.0 / (1.0 + 0.5 * z);
    let poly = -z * z - 1.265_512_23
        + t * (1.000_023_68
            + t * (0.374_091_96
                + t * (0.096_784_18
                    + t * (-0.186_288_06
                        + t * (0.278_868_07
                            + t * (-1.135_203_98 + t * (1.488_515_87 + t * (-0.822_152_23 + t * 0.170_872_77))))))));
    let r = t * poly.exp();
    if x >= 0.0 {
        r
    } else {
        2.0 - r
    }
}
