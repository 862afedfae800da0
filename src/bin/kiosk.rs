//! kiosk - capture and submit tool for the face-attendance backend.
//!
//! Two flows:
//! 1. `kiosk register` - acquire the camera, capture front/left/right
//!    photos of the student, submit them with name and roll number.
//! 2. `kiosk attend` - submit a photo of the room and print the
//!    attendance the server marked from it.

use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use attendance_kiosk::ui::Ui;
use attendance_kiosk::{
    render, Angle, CameraSession, HttpApi, KioskConfig, KioskController, KioskError,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Face-attendance kiosk client")]
struct Args {
    /// UI rendering mode: auto, plain or pretty.
    #[arg(long, env = "KIOSK_UI")]
    ui: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a student: capture three angle photos and submit them.
    Register {
        /// Student name.
        #[arg(long, env = "KIOSK_STUDENT_NAME")]
        name: String,

        /// Student roll number.
        #[arg(long, env = "KIOSK_STUDENT_ROLL")]
        roll: String,

        /// Capture all three angles without prompting between them.
        #[arg(long)]
        auto: bool,
    },
    /// Mark attendance from a photo file.
    Attend {
        /// Photo of the room to submit.
        #[arg(long)]
        file: PathBuf,

        /// Also write the rendered HTML results to this path.
        #[arg(long)]
        html_out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let config = KioskConfig::load()?;
    let ui = Ui::from_flag(args.ui.as_deref(), std::io::stderr().is_terminal());

    match args.command {
        Command::Register { name, roll, auto } => run_register(&config, &ui, &name, &roll, auto),
        Command::Attend { file, html_out } => run_attend(&config, &ui, &file, html_out.as_deref()),
    }
}

fn run_register(config: &KioskConfig, ui: &Ui, name: &str, roll: &str, auto: bool) -> Result<()> {
    let api = HttpApi::new(&config.server.base_url, config.server.timeout)?;
    let camera = CameraSession::new(config.camera.clone())?;
    let mut controller = KioskController::new(camera, api);

    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let interrupted = interrupted.clone();
        ctrlc::set_handler(move || interrupted.store(true, Ordering::SeqCst))
            .context("install interrupt handler")?;
    }

    {
        let _stage = ui.stage("starting camera");
        controller.start_camera()?;
    }

    for angle in Angle::ALL {
        if interrupted.load(Ordering::SeqCst) {
            // Camera is released by the session drop.
            bail!("interrupted before {} capture", angle);
        }
        if !auto {
            prompt(&format!("Position for the {} photo, then press Enter", angle))?;
        }
        let _stage = ui.stage(&format!("capturing {} photo", angle));
        controller.capture_photo(angle)?;
    }
    controller.stop_camera();

    let stage = ui.stage("submitting registration");
    match controller.submit_registration(name, roll) {
        Ok(message) => {
            drop(stage);
            println!("{message}");
            Ok(())
        }
        Err(err) => {
            stage.fail(&err.to_string());
            report_retryable(&err);
            Err(err.into())
        }
    }
}

fn run_attend(
    config: &KioskConfig,
    ui: &Ui,
    file: &std::path::Path,
    html_out: Option<&std::path::Path>,
) -> Result<()> {
    let api = HttpApi::new(&config.server.base_url, config.server.timeout)?;
    // The attendance flow never touches the camera; the session stays idle.
    let camera = CameraSession::new(config.camera.clone())?;
    let mut controller = KioskController::new(camera, api);

    let stage = ui.stage("submitting attendance photo");
    let result = match controller.mark_attendance(file) {
        Ok(result) => {
            drop(stage);
            result
        }
        Err(err) => {
            stage.fail(&err.to_string());
            report_retryable(&err);
            return Err(err.into());
        }
    };

    print!("{}", render::to_text(&result));

    if let Some(path) = html_out {
        let html = controller.results_html().unwrap_or_default();
        std::fs::write(path, html)
            .with_context(|| format!("write html results to {}", path.display()))?;
        log::info!("html results written to {}", path.display());
    }
    Ok(())
}

fn prompt(message: &str) -> Result<()> {
    eprint!("{message} ");
    std::io::stderr().flush().ok();
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("read operator input")?;
    Ok(())
}

fn report_retryable(err: &KioskError) {
    match err {
        KioskError::Validation(_) => eprintln!("Nothing was sent; fix the input and retry."),
        KioskError::Rejected(_) => eprintln!("Captured photos were kept; edit and resubmit."),
        KioskError::Transport(_) => eprintln!("Nothing was changed; check the server and retry."),
        KioskError::Camera(_) => eprintln!("Check the camera connection and retry."),
    }
}
