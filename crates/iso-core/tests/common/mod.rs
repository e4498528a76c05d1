#![allow(dead_code)]

/// Every vector of `isotopes` non-negative counts summing to `atoms`.
pub fn all_confs(atoms: u32, isotopes: usize) -> Vec<Vec<u32>> {
    let mut out = Vec::new();
    let mut current = vec![0u32; isotopes];
    fill(atoms, 0, &mut current, &mut out);
    out
}

fn fill(remaining: u32, position: usize, current: &mut Vec<u32>, out: &mut Vec<Vec<u32>>) {
    if position + 1 == current.len() {
        current[position] = remaining;
        out.push(current.clone());
        return;
    }
    for count in 0..=remaining {
        current[position] = count;
        fill(remaining - count, position + 1, current, out);
    }
}

/// Natural abundances and masses of the stable isotopes of a few elements.
pub fn carbon() -> (Vec<f64>, Vec<f64>) {
    (vec![12.0, 13.003_354_835_07], vec![0.9893, 0.0107])
}

pub fn oxygen() -> (Vec<f64>, Vec<f64>) {
    (
        vec![15.994_914_619_57, 16.999_131_756_50, 17.999_161_0],
        vec![0.99757, 0.00038, 0.00205],
    )
}

pub fn sulfur() -> (Vec<f64>, Vec<f64>) {
    (
        vec![31.972_071_174_4, 32.971_458_909_8, 33.967_867_004, 35.967_080_71],
        vec![0.9499, 0.0075, 0.0425, 0.0001],
    )
}
