mod scene;

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use eframe::{App, Frame, NativeOptions, egui, run_native};
use egui::{ColorImage, Key, Sense, TextureHandle, TextureOptions};
use faultscape_core::{
    NavAction, Terrain, TerrainError, TerrainParams, ViewerConfig, ViewerContext,
    pipeline::build_terrain_seeded, utils::to_height_image,
};
use image::RgbImage;
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;
use tracing_subscriber::EnvFilter;

// Held keys driving the camera, sampled every frame
const KEY_BINDINGS: [(Key, NavAction); 8] = [
    (Key::W, NavAction::Forward),
    (Key::S, NavAction::Back),
    (Key::A, NavAction::StrafeLeft),
    (Key::D, NavAction::StrafeRight),
    (Key::ArrowLeft, NavAction::YawLeft),
    (Key::ArrowRight, NavAction::YawRight),
    (Key::ArrowUp, NavAction::PitchUp),
    (Key::ArrowDown, NavAction::PitchDown),
];

#[derive(Parser, Debug)]
#[command(name = "faultscape", about = "Fault-formation terrain generator and fly-through viewer")]
struct Args {
    #[arg(
        long,
        default_value = "faultscape.toml",
        help = "TOML file with [terrain], [camera] and [fog] settings"
    )]
    config: PathBuf,

    #[arg(long, help = "Fixed seed for terrain generation (overrides the config)")]
    seed: Option<u64>,
}

struct PendingBuild {
    handle: JoinHandle<faultscape_core::Result<Terrain>>,
    params: TerrainParams,
    started: Instant,
}

struct TerrainApp {
    // parameters of the next regeneration
    params: TerrainParams,
    fixed_seed: bool,
    seed: u64,

    viewer: ViewerContext,
    runtime: Runtime,
    pending: Option<PendingBuild>,

    // top-down preview of the last heights
    preview: Option<TextureHandle>,
    status_message: String,
}

impl TerrainApp {
    fn new(config: ViewerConfig) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(Self {
            fixed_seed: config.terrain.seed.is_some(),
            seed: config.terrain.seed.unwrap_or(2025),
            params: config.terrain.clone(),
            viewer: ViewerContext::from_config(&config),
            runtime,
            pending: None,
            preview: None,
            status_message: "Click “Generate Terrain” to start".into(),
        })
    }

    // Terrain synthesis is O(N²·W); run it off the UI thread
    fn start_build(&mut self) {
        if self.pending.is_some() {
            self.status_message = "Generation already running".into();
            return;
        }
        let mut params = self.params.clone();
        params.seed = self.fixed_seed.then_some(self.seed);
        tracing::info!(?params, "regenerating terrain");

        let job = params.clone();
        let handle = self.runtime.spawn_blocking(move || build_terrain_seeded(&job));
        self.pending = Some(PendingBuild {
            handle,
            params,
            started: Instant::now(),
        });
        self.status_message = "Generating…".into();
    }

    fn poll_build(&mut self, ctx: &egui::Context) {
        let finished = self
            .pending
            .as_ref()
            .is_some_and(|pending| pending.handle.is_finished());
        if !finished {
            return;
        }
        let Some(pending) = self.pending.take() else {
            return;
        };

        let elapsed_ms = pending.started.elapsed().as_secs_f32() * 1000.0;
        match self.runtime.block_on(pending.handle) {
            Ok(Ok(terrain)) => {
                let image = to_height_image(&terrain.heights);
                self.preview = Some(load_preview(ctx, &image));
                self.viewer.replace_terrain(terrain.mesh);
                self.status_message = match pending.params.seed {
                    Some(seed) => format!("Generated in {elapsed_ms:.2} ms (seed {seed})"),
                    None => format!("Generated in {elapsed_ms:.2} ms"),
                };
            }
            Ok(Err(err)) => {
                self.status_message = report(&err);
            }
            Err(join_err) => {
                tracing::error!(%join_err, "terrain task failed");
                self.status_message = format!("Generation failed: {join_err}");
            }
        }
    }

    fn read_keys(&mut self, ctx: &egui::Context) {
        // Typing into a field must not fly the camera
        let typing = ctx.wants_keyboard_input();
        ctx.input(|i| {
            for (key, action) in KEY_BINDINGS {
                self.viewer.set_held(action, !typing && i.key_down(key));
            }
            if typing {
                return;
            }
            if i.key_pressed(Key::F) {
                self.viewer.fog.toggle();
            }
            if i.key_pressed(Key::G) {
                self.viewer.fog.thinner();
            }
            if i.key_pressed(Key::H) {
                self.viewer.fog.thicker();
            }
        });
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("Terrain Generator");
        ui.separator();

        ui.label("Grid size (2–255)");
        ui.add(egui::DragValue::new(&mut self.params.grid_size).range(0..=512));

        ui.label("Faults");
        ui.add(egui::DragValue::new(&mut self.params.fault_count).range(0..=5000));

        ui.label("Weathering iterations");
        ui.add(egui::Slider::new(&mut self.params.weathering_iterations, 0..=50));

        ui.checkbox(&mut self.fixed_seed, "Fixed seed");
        if self.fixed_seed {
            ui.add(egui::DragValue::new(&mut self.seed).speed(1.0));
        }

        ui.separator();
        let idle = self.pending.is_none();
        if ui
            .add_enabled(idle, egui::Button::new("Generate Terrain"))
            .clicked()
        {
            self.start_build();
        }

        ui.separator();
        ui.label(format!(
            "Fog: {} (×{:.2})",
            if self.viewer.fog.enabled { "on" } else { "off" },
            self.viewer.fog.intensity
        ));
        let cam = &self.viewer.camera;
        ui.label(format!(
            "Camera ({:.2}, {:.2}, {:.2})",
            cam.position.x, cam.position.y, cam.position.z
        ));
        ui.label("W/S/A/D move, arrows turn, F/G/H fog");

        if let Some(tex) = &self.preview {
            ui.separator();
            ui.image((tex.id(), egui::vec2(160.0, 160.0)));
        }

        ui.separator();
        ui.label(&self.status_message);
    }
}

impl App for TerrainApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.poll_build(ctx);
        self.read_keys(ctx);
        self.viewer.tick();

        egui::SidePanel::left("controls").show(ctx, |ui| self.controls(ui));

        // central display
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(scene::clear_color32()))
            .show(ctx, |ui| {
                let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
                match &self.viewer.terrain {
                    Some(mesh) => scene::paint_terrain(
                        &painter,
                        response.rect,
                        mesh,
                        &self.viewer.camera,
                        &self.viewer.fog,
                    ),
                    None => {
                        painter.text(
                            response.rect.center(),
                            egui::Align2::CENTER_CENTER,
                            "no terrain yet",
                            egui::FontId::proportional(16.0),
                            egui::Color32::WHITE,
                        );
                    }
                }
            });

        // held keys act every frame; a running build is polled every frame
        if self.pending.is_some() || !self.viewer.input.is_idle() {
            ctx.request_repaint();
        }
    }
}

fn load_preview(ctx: &egui::Context, image: &RgbImage) -> TextureHandle {
    let size = [image.width() as usize, image.height() as usize];
    let color_image = ColorImage::from_rgb(size, image.as_raw());
    ctx.load_texture("terrain-preview", color_image, TextureOptions::NEAREST)
}

fn report(err: &TerrainError) -> String {
    tracing::warn!(%err, "regeneration failed");
    format!("Error: {err}")
}

fn load_config(args: &Args) -> faultscape_core::Result<ViewerConfig> {
    let mut config = match ViewerConfig::load_from_file(&args.config) {
        Ok(config) => config,
        Err(TerrainError::ConfigIo { path, source })
            if source.kind() == std::io::ErrorKind::NotFound =>
        {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            ViewerConfig::default()
        }
        Err(err) => return Err(err),
    };
    if args.seed.is_some() {
        config.terrain.seed = args.seed;
    }
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    let opts = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 720.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };
    run_native(
        "Faultscape",
        opts,
        Box::new(move |_cc| Ok(Box::new(TerrainApp::new(config)?))),
    )?;
    Ok(())
}
