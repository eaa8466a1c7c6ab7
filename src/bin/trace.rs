use clap::Parser;
use log::{info, trace, LevelFilter};
use nee_tracer::{
    camera::PinholeCamera,
    color::Color,
    config::RenderConfig,
    geometry::{point::Point, vector::Vector},
    integrator::PathIntegrator,
    scenes,
    sensor::Sensor,
};
use std::sync::Mutex;
use std::time::Instant;

#[derive(Parser)]
struct Cli {
    #[clap(long, default_value_t = String::from("out.exr"))]
    output: String,

    #[clap(long, default_value_t = 512)]
    width: u32,

    #[clap(long, default_value_t = 512)]
    height: u32,

    #[clap(long, default_value_t = 32)]
    samples: u32,

    #[clap(long, default_value_t = 8)]
    max_path_length: u32,

    /// Disables next-event estimation, falling back to plain emission hits.
    #[clap(long)]
    no_nee: bool,
}

fn main() {
    env_logger::Builder::new()
        .filter(None, LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Cli::parse();
    let config = RenderConfig {
        image_width: args.width,
        image_height: args.height,
        max_path_length: args.max_path_length,
        max_samples: args.samples,
        enable_nee: !args.no_nee,
    };
    config.validate().expect("invalid render configuration");

    let start = Instant::now();
    let scene = scenes::cornell_box().expect("failed to build demo scene");
    let camera = PinholeCamera::new(
        Point::new(0, 5, 18),
        Point::new(0, 4, 0),
        Vector::Y,
        40.0,
        config.image_width,
        config.image_height,
    );
    let sensor = Sensor::new(config.image_width, config.image_height, config.max_samples)
        .expect("invalid sensor dimensions");
    info!("Scene constructed in {:?}", start.elapsed());

    let sensor = render_scanlines(&camera, &scene, config, sensor);
    info!("Rendering finished in {:.1?}", start.elapsed());

    let pixels: Vec<f32> = (0..config.image_height)
        .flat_map(|y| {
            (0..config.image_width).flat_map(move |x| {
                let (r, g, b): (f32, f32, f32) = sensor_pixel(&sensor, x, y).into();
                [r, g, b]
            })
        })
        .collect();
    let image_buffer = image::Rgb32FImage::from_raw(config.image_width, config.image_height, pixels)
        .expect("pixel buffer size mismatch");
    image_buffer.save(&args.output).expect("error saving output file");
    info!("Output written to {}", &args.output);
}

fn sensor_pixel(sensor: &Sensor, x: u32, y: u32) -> Color {
    sensor.read(x, y)
}

/// Renders every scanline on its own thread. Each pixel seeds its own
/// `Sampler` from its coordinates and draws all of its samples before a
/// single write lands in the sensor, so the only contention between threads
/// is the brief lock `PathIntegrator::estimate` takes to perform that write
/// — everything upstream of it is thread-local. Tile-based work-stealing and
/// adaptive sampling are out of scope for this crate.
fn render_scanlines(
    camera: &PinholeCamera,
    scene: &nee_tracer::scene::Scene,
    config: RenderConfig,
    sensor: Sensor,
) -> Sensor {
    let sensor = Mutex::new(sensor);
    let integrator = PathIntegrator::new(camera, scene, &sensor, config);
    let width = config.image_width;
    let height = config.image_height;

    std::thread::scope(|scope| {
        let mut handles = Vec::new();
        for y in 0..height {
            let integrator = &integrator;
            handles.push(scope.spawn(move || {
                trace!("rendering scanline {y}");
                for x in 0..width {
                    integrator.estimate(x, y);
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
    });

    sensor.into_inner().unwrap()
}
