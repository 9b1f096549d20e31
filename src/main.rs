fn main() {
    if let Err(err) = chart_svg_renderer::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
