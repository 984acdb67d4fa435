use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use findesk_documents::{CouponStatementDocument, InterestOverviewDocument, InvoiceDocument};
use findesk_printing::{
    dispatch, paginate, ColorMode, FontScale, MarginPreset, Orientation, PageClip, PrintContent,
    PrintContext, PrintHost, PrintSettings, StyleAccessError, StyleSource, TextMetricsProbe,
};

#[derive(Parser)]
#[command(
    name = "findesk-cli",
    about = "Utility commands for FinDesk printable documents",
    author,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 將 JSON 文件資料轉為 HTML 片段。 / Render a document JSON file to its bare HTML fragment.
    Render(RenderArgs),
    /// 產生可直接列印的獨立 HTML 文件。 / Emit the full standalone print document.
    Print(PrintArgs),
    /// 回報指定設定下的分頁結果。 / Report the computed pagination for a document.
    Paginate(PaginateArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DocumentKind {
    /// 票息利息發票。 / Coupon interest invoice.
    Invoice,
    /// 票息支付明細表。 / Coupon payment schedule.
    Statement,
    /// 利息計算總覽。 / Interest calculation overview.
    Overview,
}

#[derive(Args)]
struct RenderArgs {
    /// 文件資料 JSON 路徑。 / Path to the document data JSON file.
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// 文件類型。 / Document type.
    #[arg(long, value_enum)]
    kind: DocumentKind,

    /// 輸出檔案；省略時寫到標準輸出。 / Output file; stdout when omitted.
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct PrintArgs {
    /// 文件資料 JSON 路徑。 / Path to the document data JSON file.
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// 文件類型。 / Document type.
    #[arg(long, value_enum)]
    kind: DocumentKind,

    /// 列印文件輸出路徑。 / Destination for the print document.
    #[arg(long, value_name = "FILE")]
    output: PathBuf,

    /// 附加的 CSS 檔案；無法讀取的檔案會被略過。 / Extra CSS files; unreadable ones are skipped.
    #[arg(long, value_name = "FILE")]
    styles: Vec<PathBuf>,

    /// 文件標題；預設依文件類型決定。 / Document title; defaults per document type.
    #[arg(long, value_name = "TEXT")]
    title: Option<String>,

    #[command(flatten)]
    settings: SettingsArgs,
}

#[derive(Args)]
struct PaginateArgs {
    /// 文件資料 JSON 路徑。 / Path to the document data JSON file.
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// 文件類型。 / Document type.
    #[arg(long, value_enum)]
    kind: DocumentKind,

    #[command(flatten)]
    settings: SettingsArgs,
}

#[derive(Args)]
struct SettingsArgs {
    /// 頁面邊界（英吋）。 / Page margin in inches (0.25, 0.5, 0.75, 1, 1.25, 1.5, 2).
    #[arg(long, value_name = "INCHES", value_parser = parse_margin, default_value = "0.25")]
    margin: MarginPreset,

    /// 字體縮放百分比。 / Font scale percent (50-200, enumerated steps).
    #[arg(long, value_name = "PERCENT", value_parser = parse_font_scale, default_value = "100")]
    font_scale: FontScale,

    /// 頁面方向。 / Page orientation.
    #[arg(long, value_enum, default_value_t = OrientationChoice::Portrait)]
    orientation: OrientationChoice,

    /// 色彩模式。 / Colour reproduction mode.
    #[arg(long, value_enum, default_value_t = ColorChoice::Exact)]
    color: ColorChoice,
}

impl SettingsArgs {
    fn to_settings(&self) -> PrintSettings {
        PrintSettings {
            margin: self.margin,
            font_scale: self.font_scale,
            orientation: self.orientation.into(),
            color_mode: self.color.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OrientationChoice {
    Portrait,
    Landscape,
}

impl From<OrientationChoice> for Orientation {
    fn from(choice: OrientationChoice) -> Self {
        match choice {
            OrientationChoice::Portrait => Orientation::Portrait,
            OrientationChoice::Landscape => Orientation::Landscape,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ColorChoice {
    Exact,
    Economy,
}

impl From<ColorChoice> for ColorMode {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Exact => ColorMode::Exact,
            ColorChoice::Economy => ColorMode::Economy,
        }
    }
}

fn parse_margin(value: &str) -> Result<MarginPreset, String> {
    let trimmed = value.trim().trim_end_matches("in");
    MarginPreset::ALL
        .iter()
        .copied()
        .find(|preset| preset.css_inches() == trimmed)
        .ok_or_else(|| {
            format!(
                "unsupported margin '{value}'; choose one of 0.25, 0.5, 0.75, 1, 1.25, 1.5, 2"
            )
        })
}

fn parse_font_scale(value: &str) -> Result<FontScale, String> {
    let trimmed = value.trim().trim_end_matches('%');
    let percent: u32 = trimmed
        .parse()
        .map_err(|_| format!("font scale '{value}' is not a number"))?;
    FontScale::ALL
        .iter()
        .copied()
        .find(|scale| scale.percent() == percent)
        .ok_or_else(|| {
            format!(
                "unsupported font scale {percent}%; choose one of 50, 60, 70, 80, 90, 100, \
                 110, 120, 130, 150, 175, 200"
            )
        })
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let Cli { command } = Cli::parse();
    match command {
        Commands::Render(args) => execute_render(args),
        Commands::Print(args) => execute_print(args),
        Commands::Paginate(args) => execute_paginate(args),
    }
}

fn execute_render(args: RenderArgs) -> Result<()> {
    let (html, _) = load_document(args.kind, &args.input)?;
    match args.output {
        Some(path) => {
            fs::write(&path, html)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Rendered document to {}", path.display());
        }
        None => println!("{html}"),
    }
    Ok(())
}

fn execute_print(args: PrintArgs) -> Result<()> {
    let (html, default_title) = load_document(args.kind, &args.input)?;
    let settings = args.settings.to_settings();
    let title = args.title.as_deref().unwrap_or(default_title);

    let sources: Vec<FileStyleSource> = args.styles.iter().map(FileStyleSource::new).collect();
    let refs: Vec<&dyn StyleSource> = sources
        .iter()
        .map(|source| source as &dyn StyleSource)
        .collect();
    let styles = findesk_printing::collect_styles(&refs);

    let host = CapturePrintHost::default();
    dispatch(
        &PrintContent::Single(html),
        &settings,
        &styles,
        title,
        &host,
    );
    let document = host
        .take_document()
        .ok_or_else(|| anyhow!("print dispatch produced no document"))?;
    fs::write(&args.output, document)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    println!("Wrote print document to {}", args.output.display());
    Ok(())
}

fn execute_paginate(args: PaginateArgs) -> Result<()> {
    let (html, _) = load_document(args.kind, &args.input)?;
    let settings = args.settings.to_settings();
    let probe = TextMetricsProbe::default();

    let pagination = paginate(&PrintContent::Single(html), &settings, &probe)
        .ok_or_else(|| anyhow!("measurement probe was not ready"))?;

    let (width, height) = settings.page_size_px();
    println!(
        "Page box: {width}x{height} px, content {}x{} px, margin {}in",
        settings.content_width_px(),
        settings.content_height_px(),
        settings.margin.css_inches()
    );
    println!("Pages: {}", pagination.page_count());
    for page in &pagination.pages {
        let clip = match page.clip {
            PageClip::Fixed(px) => format!("{px}px"),
            PageClip::Auto => "auto".to_string(),
        };
        println!(
            "  Page {}: offset {}px, clip {}",
            page.number, page.offset_px, clip
        );
    }
    Ok(())
}

fn load_document(kind: DocumentKind, path: &Path) -> Result<(String, &'static str)> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let rendered = match kind {
        DocumentKind::Invoice => {
            let document: InvoiceDocument = serde_json::from_str(&data)
                .with_context(|| format!("failed to parse invoice data {}", path.display()))?;
            (document.render(), "Coupon Interest Invoice")
        }
        DocumentKind::Statement => {
            let document: CouponStatementDocument = serde_json::from_str(&data)
                .with_context(|| format!("failed to parse statement data {}", path.display()))?;
            (document.render(), "Coupon Payment Schedule")
        }
        DocumentKind::Overview => {
            let document: InterestOverviewDocument = serde_json::from_str(&data)
                .with_context(|| format!("failed to parse overview data {}", path.display()))?;
            (document.render(), "Interest Calculation Overview")
        }
    };
    Ok(rendered)
}

/// Reads one CSS file on demand so unreadable files degrade to a skipped
/// style source rather than a failed command.
struct FileStyleSource {
    path: PathBuf,
}

impl FileStyleSource {
    fn new(path: &PathBuf) -> Self {
        Self { path: path.clone() }
    }
}

impl StyleSource for FileStyleSource {
    fn rules(&self) -> Result<String, StyleAccessError> {
        fs::read_to_string(&self.path)
            .map_err(|err| StyleAccessError(format!("{}: {err}", self.path.display())))
    }
}

/// Print host that captures the dispatched document instead of opening a
/// platform print dialog.
#[derive(Default)]
struct CapturePrintHost {
    document: Arc<Mutex<Option<String>>>,
}

impl CapturePrintHost {
    fn take_document(&self) -> Option<String> {
        self.document.lock().ok()?.take()
    }
}

impl PrintHost for CapturePrintHost {
    fn open_print_context(&self) -> Option<Box<dyn PrintContext>> {
        Some(Box::new(CaptureContext {
            buffer: String::new(),
            document: Arc::clone(&self.document),
        }))
    }
}

struct CaptureContext {
    buffer: String,
    document: Arc<Mutex<Option<String>>>,
}

impl PrintContext for CaptureContext {
    fn write_document(&mut self, html: &str) {
        self.buffer.push_str(html);
    }

    fn dispatch_print(self: Box<Self>, _delay: Duration) {
        if let Ok(mut slot) = self.document.lock() {
            *slot = Some(self.buffer);
        }
    }
}
