use console::Style;
use phasecorr_core::config::RegistrationConfig;
use phasecorr_core::frame::Alignment;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    shift: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            shift: Style::new().green().bold(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_registration_summary(
    src_label: &str,
    target_label: &str,
    shape: &[usize],
    config: &RegistrationConfig,
    alignment: &Alignment,
) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Phase Correlation"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(17)));
    println!();

    println!("  {:<14}{}", s.label.apply_to("Source"), s.path.apply_to(src_label));
    println!("  {:<14}{}", s.label.apply_to("Target"), s.path.apply_to(target_label));
    println!(
        "  {:<14}{}",
        s.label.apply_to("Shape"),
        s.value.apply_to(format!("{shape:?}"))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Upscale"),
        s.value.apply_to(config.upscale_factor)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Channel"),
        s.value.apply_to(config.channel_reduction)
    );
    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Shift"),
        s.shift.apply_to(alignment.shift)
    );
    if config.upscale_factor != 1.0 {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Working"),
            s.value.apply_to(alignment.working_shift)
        );
    }
    println!();
}
