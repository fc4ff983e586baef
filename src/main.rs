use crate::app::App;
use crate::atlas::TexturedQuad;
use crate::camera::Camera;
use crate::game::Session;
use crate::obstacle::RewardHolderOutOfRange;
use crate::projection::{DebugOverlay, DrawCommand};
use crate::render::screen_size;
use crate::status::Status;
use rand::{Rng, SeedableRng};
use rand_isaac::Isaac64Rng;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info};

mod app;
mod atlas;
mod board;
mod camera;
mod game;
mod obstacle;
mod projection;
mod render;
mod status;

const CELL_WIDTH_PX: f64 = 16.;
const CELL_HEIGHT_PX: f64 = 32.;
const DEFAULT_FONT: &str = "assets/fonts/PxPlus_IBM_CGAthin.ttf";
const DEFAULT_BOLD_FONT: &str = "assets/fonts/PxPlus_IBM_CGA.ttf";

struct Args {
    rng_seed: u64,
    reward_holder: Option<usize>,
    debug: bool,
    font: PathBuf,
    bold_font: PathBuf,
    dump_frame: bool,
}

impl Args {
    fn parser() -> impl meap::Parser<Item = Self> {
        meap::let_map! {
            let {
                rng_seed = opt_opt::<u64, _>("INT", 'r').name("rng-seed").desc("seed deciding which rock hides the money");
                reward_holder = opt_opt::<usize, _>("INDEX", "reward-holder").desc("hide the money under this rock instead of a random one");
                debug = flag("debug").desc("draw origin and pointer markers");
                font = opt_opt::<String, _>("PATH", "font").desc("ttf file for normal text, required to open the window (default: assets/fonts/PxPlus_IBM_CGAthin.ttf)");
                bold_font = opt_opt::<String, _>("PATH", "bold-font").desc("ttf file for bold text, required to open the window (default: assets/fonts/PxPlus_IBM_CGA.ttf)");
                dump_frame = flag("dump-frame").desc("print the first frame as json and exit");
            } in {{
                let rng_seed = rng_seed.unwrap_or_else(|| rand::thread_rng().gen());
                Self {
                    rng_seed,
                    reward_holder,
                    debug,
                    font: PathBuf::from(font.unwrap_or_else(|| DEFAULT_FONT.to_string())),
                    bold_font: PathBuf::from(bold_font.unwrap_or_else(|| DEFAULT_BOLD_FONT.to_string())),
                    dump_frame,
                }
            }}
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum AssetError {
    #[error("failed to read font {} (pass --font and --bold-font to choose ttf files): {}", .path.display(), .source)]
    Font {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn load_font(path: &Path) -> Result<Vec<u8>, AssetError> {
    std::fs::read(path).map_err(|source| AssetError::Font {
        path: path.to_path_buf(),
        source,
    })
}

fn new_session(
    rng_seed: u64,
    reward_holder: Option<usize>,
) -> Result<Session, RewardHolderOutOfRange> {
    match reward_holder {
        Some(index) => Session::with_reward_holder(index),
        None => Ok(Session::new(&mut Isaac64Rng::seed_from_u64(rng_seed))),
    }
}

#[derive(Serialize)]
struct FrameDump {
    rng_seed: u64,
    status: Status,
    commands: Vec<DrawCommand>,
    quads: Vec<TexturedQuad>,
}

impl FrameDump {
    fn new(rng_seed: u64, session: &Session, debug: Option<&DebugOverlay>) -> Self {
        let commands = projection::project(session, debug);
        let quads = atlas::quads(&commands);
        Self {
            rng_seed,
            status: session.status(),
            commands,
            quads,
        }
    }
}

fn window_dimensions() -> (f64, f64) {
    let size = screen_size();
    (
        size.width() as f64 * CELL_WIDTH_PX,
        size.height() as f64 * CELL_HEIGHT_PX,
    )
}

fn main() {
    use chargrid_graphical::{Context, ContextDescriptor, Dimensions, FontBytes};
    use meap::Parser;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();
    let Args {
        rng_seed,
        reward_holder,
        debug,
        font,
        bold_font,
        dump_frame,
    } = Args::parser().with_help_default().parse_env_or_exit();
    info!(rng_seed, "starting session");
    let session = match new_session(rng_seed, reward_holder) {
        Ok(session) => session,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    let overlay = if debug {
        Some(DebugOverlay::default())
    } else {
        None
    };
    if dump_frame {
        let dump = FrameDump::new(rng_seed, &session, overlay.as_ref());
        match serde_json::to_string_pretty(&dump) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("failed to serialize frame: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }
    let font_bytes = match load_font(&font).and_then(|normal| {
        load_font(&bold_font).map(|bold| FontBytes { normal, bold })
    }) {
        Ok(font_bytes) => font_bytes,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    let (width, height) = window_dimensions();
    let context = Context::new(ContextDescriptor {
        font_bytes,
        title: "Rockfall".to_string(),
        window_dimensions: Dimensions { width, height },
        cell_dimensions: Dimensions {
            width: CELL_WIDTH_PX,
            height: CELL_HEIGHT_PX,
        },
        font_dimensions: Dimensions {
            width: CELL_WIDTH_PX,
            height: CELL_HEIGHT_PX,
        },
        font_source_dimensions: Dimensions {
            width: CELL_WIDTH_PX as f32,
            height: CELL_HEIGHT_PX as f32,
        },
        underline_width: 0.1,
        underline_top_offset: 0.8,
        resizable: false,
    })
    .expect("Failed to initialize graphical context");
    let camera = Camera::for_board();
    let app = App::new(session, debug, camera);
    context.run_app(app);
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn window_matches_board_aspect_ratio() {
        let (width, height) = window_dimensions();
        let aspect = (width / height) as f32;
        assert!((aspect - Camera::board_aspect_ratio()).abs() < 1e-6);
    }

    #[test]
    fn missing_font_is_reported() {
        let path = Path::new("this/font/does/not/exist.ttf");
        let message = load_font(path).unwrap_err().to_string();
        assert!(message.contains("this/font/does/not/exist.ttf"), "{}", message);
        assert!(message.contains("--font"), "{}", message);
    }

    #[test]
    fn reward_holder_can_be_chosen() {
        let session = new_session(0, Some(1)).unwrap();
        assert_eq!(session.obstacles().reward_holder(), 1);
        let e = new_session(0, Some(5)).err().unwrap();
        assert_eq!(e, RewardHolderOutOfRange { index: 5, count: 5 });
        let seeded = new_session(7, None).unwrap();
        let again = new_session(7, None).unwrap();
        assert_eq!(
            seeded.obstacles().reward_holder(),
            again.obstacles().reward_holder()
        );
    }

    #[test]
    fn frame_dump_is_json() {
        let session = Session::with_reward_holder(4).unwrap();
        let dump = FrameDump::new(9, &session, None);
        let value = serde_json::to_value(&dump).unwrap();
        assert_eq!(value["rng_seed"], 9);
        assert_eq!(value["status"], "Start");
        assert_eq!(value["commands"][0]["kind"], "sprite");
        assert_eq!(value["commands"][0]["sprite"], "map");
        assert_eq!(
            value["quads"].as_array().unwrap().len(),
            value["commands"].as_array().unwrap().len()
        );
    }
}
