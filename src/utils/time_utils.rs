/// Monotonic instant that also works on wasm targets.
pub type AppInstant = web_time::Instant;

pub fn format_duration_ms(ms: u128) -> String {
    if ms < 1000 {
        return format!("{}ms", ms);
    }
    let secs = ms as f64 / 1000.0;
    if secs < 60.0 {
        return format!("{:.2}s", secs);
    }
    let mins = (secs / 60.0).floor();
    format!("{}m {:.0}s", mins, secs - mins * 60.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_render_compactly() {
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(1500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }
}
