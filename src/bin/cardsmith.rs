use std::path::{Path, PathBuf};

use anyhow::Context as _;
use cardsmith::{
    Controller, DirSink, ExportKind, FieldName, FileStore, ImageSlot, SvgRasterizer,
};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "cardsmith", version, about = "Build and export a digital business card")]
struct Cli {
    /// Directory holding the saved card (defaults to the platform data directory).
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the rendered card view as JSON.
    Show(FaceArgs),
    /// Set a form field (`fullName`, `email`, `skills`, ...). An empty value clears it.
    Set {
        /// Field key.
        field: String,
        /// New value.
        value: String,
    },
    /// Switch template (minimalist, professional, creative, corporate, tech).
    Template {
        /// Template identifier.
        id: String,
    },
    /// Set the card font family. An empty value restores the default.
    Font {
        /// CSS font-family list.
        family: String,
    },
    /// Override the accent colour.
    Accent {
        /// Colour as `#RRGGBB`.
        color: String,
    },
    /// Embed an image file.
    Upload {
        /// Which image to replace.
        slot: SlotArg,
        /// Image file (PNG, JPEG, GIF or WebP).
        path: PathBuf,
    },
    /// Print the view of the opposite (back) face as JSON.
    Flip,
    /// Check required fields and the email format.
    Validate,
    /// Write the QR code SVG.
    Qr {
        /// Output SVG path.
        #[arg(long)]
        out: PathBuf,
    },
    /// Write the card face as SVG.
    Svg {
        #[command(flatten)]
        face: FaceArgs,
        /// Output SVG path.
        #[arg(long)]
        out: PathBuf,
    },
    /// Export the card as PNG, PDF or a vCard contact file.
    Export {
        /// Export format.
        kind: KindArg,
        #[command(flatten)]
        face: FaceArgs,
        /// Directory to write the file into.
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Restore the sample card and forget the saved state.
    Reset,
}

#[derive(Parser, Debug)]
struct FaceArgs {
    /// Use the back face instead of the front.
    #[arg(long, default_value_t = false)]
    back: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SlotArg {
    Profile,
    Logo,
}

impl From<SlotArg> for ImageSlot {
    fn from(s: SlotArg) -> Self {
        match s {
            SlotArg::Profile => ImageSlot::Profile,
            SlotArg::Logo => ImageSlot::Logo,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum KindArg {
    Png,
    Pdf,
    #[value(alias = "vcard")]
    Vcf,
}

impl From<KindArg> for ExportKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Png => ExportKind::Png,
            KindArg::Pdf => ExportKind::Pdf,
            KindArg::Vcf => ExportKind::Vcf,
        }
    }
}

type Ctl = Controller<FileStore, SvgRasterizer>;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let store = match cli.store {
        Some(dir) => FileStore::new(dir),
        None => FileStore::in_data_dir()?,
    };
    let mut ctl: Ctl = Controller::new(store);

    match cli.cmd {
        Command::Show(face) => cmd_show(&mut ctl, face.back),
        Command::Set { field, value } => cmd_set(&mut ctl, &field, value),
        Command::Template { id } => Ok(ctl.select_template(&id)?),
        Command::Font { family } => {
            ctl.set_font(&family);
            Ok(())
        }
        Command::Accent { color } => Ok(ctl.set_accent(&color)?),
        Command::Upload { slot, path } => cmd_upload(&mut ctl, slot.into(), &path),
        Command::Flip => cmd_show(&mut ctl, true),
        Command::Validate => cmd_validate(&mut ctl),
        Command::Qr { out } => cmd_qr(&ctl, &out),
        Command::Svg { face, out } => cmd_svg(&mut ctl, face.back, &out),
        Command::Export {
            kind,
            face,
            out_dir,
        } => cmd_export(&mut ctl, kind.into(), face.back, out_dir),
        Command::Reset => Ok(ctl.reset()?),
    }
}

fn present(ctl: &mut Ctl, back: bool) {
    if back {
        ctl.flip();
    }
}

fn cmd_show(ctl: &mut Ctl, back: bool) -> anyhow::Result<()> {
    present(ctl, back);
    let json = serde_json::to_string_pretty(ctl.view()).context("serialize card view")?;
    println!("{json}");
    Ok(())
}

fn cmd_set(ctl: &mut Ctl, field: &str, value: String) -> anyhow::Result<()> {
    let field: FieldName = field.parse()?;
    ctl.input(field, value, std::time::Instant::now());
    ctl.flush();
    Ok(())
}

fn cmd_upload(ctl: &mut Ctl, slot: ImageSlot, path: &Path) -> anyhow::Result<()> {
    let bytes = std::fs::read(path).with_context(|| format!("read '{}'", path.display()))?;
    ctl.upload(slot, &bytes)?;
    eprintln!("embedded {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

fn cmd_validate(ctl: &mut Ctl) -> anyhow::Result<()> {
    let report = ctl.submit();
    if report.is_valid() {
        println!("ok");
        return Ok(());
    }
    let keys: Vec<&str> = report.invalid.iter().map(|f| f.key()).collect();
    for notice in ctl.take_notices() {
        eprintln!("{}", notice.message);
    }
    anyhow::bail!("invalid fields: {}", keys.join(", "))
}

fn cmd_qr(ctl: &Ctl, out: &Path) -> anyhow::Result<()> {
    let qr = ctl.qr().context("no QR code available")?;
    write_file(out, qr.to_svg().as_bytes())
}

fn cmd_svg(ctl: &mut Ctl, back: bool, out: &Path) -> anyhow::Result<()> {
    present(ctl, back);
    write_file(out, ctl.face_svg().as_bytes())
}

fn cmd_export(ctl: &mut Ctl, kind: ExportKind, back: bool, out_dir: PathBuf) -> anyhow::Result<()> {
    present(ctl, back);
    let mut sink = DirSink::new(out_dir);
    if let Some(path) = ctl.export_to(kind, &mut sink)? {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn write_file(out: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(out, bytes).with_context(|| format!("write '{}'", out.display()))?;
    eprintln!("wrote {}", out.display());
    Ok(())
}
