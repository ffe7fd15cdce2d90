use dial_meter::{DialOptions, DialUpdate, DialWidget, StyleHints, Viewer, WindowConfig};
use rand::Rng;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Start half way with a thinner, orange indicator
    let options = DialOptions::builder()
        .value("50")
        .style(
            StyleHints::builder()
                .stroke_width("6")
                .foreground_color("orange")
                .build(),
        )
        .build();
    let viewer = Viewer::new(DialWidget::new(options), WindowConfig::default());

    let (sender, receiver) = mpsc::channel();

    thread::spawn(move || {
        let mut rng = rand::rng();
        let colors = ["orange", "teal", "purple", "#c03030"];
        loop {
            let updates = [
                DialUpdate::SetValue(rng.random_range(0..=100).to_string()),
                DialUpdate::SetStyle(
                    StyleHints::builder()
                        .foreground_color(colors[rng.random_range(0..colors.len())])
                        .radius(rng.random_range(30..=45).to_string())
                        .build(),
                ),
            ];

            if updates.iter().any(|u| sender.send(u.clone()).is_err()) {
                break;
            }

            thread::sleep(Duration::from_millis(400));
        }
    });

    println!("Displaying a dial with a random value, color and radius.");
    println!("Close the window to exit");

    viewer.show_with_updates(receiver)
}
