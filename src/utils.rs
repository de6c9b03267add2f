use geo::Point;
use indicatif::{ProgressBar, ProgressStyle};

pub fn progress_bar(len: u64) -> ProgressBar {
    ProgressBar::new(len).with_style(
        ProgressStyle::with_template("[{elapsed_precise}] {human_pos}/{human_len} {percent}% ({eta})")
            .expect("hardcoded"),
    )
}

pub fn round6(x: f64) -> f64 {
    (x * 1e6).round() / 1e6
}

pub fn round_point(point: Point) -> Point {
    let (x, y) = point.x_y();
    Point::new(round6(x), round6(y))
}
