/// Create a string of all available items.
pub fn items_to_strings(items: Vec<&str>) -> String {
    items.join(", ")
}

#[inline]
pub fn precision_round(n: f64, precision: i32) -> f64 {
    let p = (10.0_f64).powi(precision);
    (n * p).round() / p
}
