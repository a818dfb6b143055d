use gyre_renderer::{logging, runtime, App, Error, RenderConfig, Renderer, SpinningTriangle};

fn main() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    run().unwrap()
}

fn run() -> Result<(), Error> {
    let config = RenderConfig::from_page()?;
    logging::init(config.log_level)?;

    let renderer = Renderer::create(&config.canvas)?.clear_color(config.clear_color);

    let mut app = SpinningTriangle::new(renderer.gl().clone(), &config);
    app.init()?;

    runtime::run(renderer, app)
}
