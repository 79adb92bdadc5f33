use clap::Parser;
use config::ViewerConfig;
use iced::{
    widget::{text, Canvas, Container},
    window, Element, Length, Subscription, Task, Theme,
};
use log::error;
use radarcore::feed::VehicleRecord;
use radarcore::prelude::RenderSurface;
use radarcore::render::Rasterizer;
use radarcore::scene::initialize;
use radarcore::simulation::Controller;
use std::path::PathBuf;

mod canvas;
mod config;
mod loader;

#[derive(Parser)]
#[command(author, version, about = "3D radar view of a vehicle snapshot")]
struct Args {
    /// Viewer config in YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// Snapshot file path or http(s) URL; overrides the config
    #[arg(long)]
    source: Option<String>,
}

fn main() -> iced::Result {
    env_logger::init();
    let args = Args::parse();
    let config = match ViewerConfig::resolve(args.config.as_deref(), args.source) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("visualizer: {err:#}");
            std::process::exit(2);
        }
    };
    let window_size = (config.window_width, config.window_height);

    iced::application(
        move || Visualizer::boot(config.clone()),
        Visualizer::update,
        Visualizer::view,
    )
    .title(application_title)
    .subscription(application_subscription)
    .theme(application_theme)
    .window_size(window_size)
    .run()
}

fn application_title(_: &Visualizer) -> String {
    "V2Sense Radar".into()
}

/// Frames are paced by the display refresh once the scene exists.
fn application_subscription(state: &Visualizer) -> Subscription<Message> {
    match state.phase {
        Phase::Running { .. } => window::frames().map(|_| Message::Frame),
        _ => Subscription::none(),
    }
}

fn application_theme(_: &Visualizer) -> Theme {
    Theme::Dark
}

enum Phase {
    Loading,
    Running {
        controller: Controller,
        surface: Rasterizer,
    },
    Failed(String),
}

struct Visualizer {
    config: ViewerConfig,
    phase: Phase,
}

#[derive(Debug, Clone)]
pub enum Message {
    DataLoaded(Result<Vec<VehicleRecord>, String>),
    Frame,
}

impl Visualizer {
    fn boot(config: ViewerConfig) -> (Self, Task<Message>) {
        let source = config.source.clone();
        (
            Visualizer {
                config,
                phase: Phase::Loading,
            },
            Task::perform(loader::load_data(source), |result| {
                Message::DataLoaded(result.map_err(|err| err.to_string()))
            }),
        )
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::DataLoaded(Ok(records)) => {
                state.phase = match state.start(&records) {
                    Ok(phase) => phase,
                    Err(err) => {
                        error!("{}", err);
                        Phase::Failed(err)
                    }
                };
                Task::none()
            }
            Message::DataLoaded(Err(err)) => {
                error!("{}", err);
                state.phase = Phase::Failed(err);
                Task::none()
            }
            Message::Frame => {
                if let Phase::Running {
                    controller,
                    surface,
                } = &mut state.phase
                {
                    controller.tick(surface);
                }
                Task::none()
            }
        }
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let viewport = state.config.viewport();
        let content: Element<'_, Message> = match &state.phase {
            Phase::Loading => text(format!("Loading vehicles from {}...", state.config.source))
                .size(18)
                .into(),
            Phase::Failed(err) => text(format!("Radar unavailable: {err}")).size(18).into(),
            Phase::Running { surface, .. } => Canvas::new(canvas::RadarView::new(surface.frame()))
                .width(Length::Fixed(viewport.width))
                .height(Length::Fixed(viewport.height))
                .into(),
        };

        Container::new(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    /// Second startup phase: attach the surface and build the scene.
    fn start(&self, records: &[VehicleRecord]) -> Result<Phase, String> {
        let viewport = self.config.viewport();
        let mut surface = Rasterizer::new();
        surface.attach(viewport).map_err(|err| err.to_string())?;
        let state =
            initialize(records, &self.config.scene, viewport).map_err(|err| err.to_string())?;
        let mut controller = Controller::new(state);
        controller.render(&mut surface);
        Ok(Phase::Running {
            controller,
            surface,
        })
    }
}
