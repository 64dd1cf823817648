use inspectit as lib;

use flexi_logger::{FileSpec, Logger};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use structopt::StructOpt;
use termion::raw::IntoRawMode;
use termion::screen::AlternateScreen;
use uuid::Uuid;

use lib::calendar::picker::{DatePicker, PickerOutcome};
use lib::calendar::{parse_iso_date, CalendarDate, MonthGrid};
use lib::cmds::Cmd;
use lib::config::Config;
use lib::error::{Error, ErrorKind};
use lib::events::{Dispatcher, Event};
use lib::inspection::{Condition, Inspection, InspectionType, ItemPatch};
use lib::report;
use lib::store::Store;
use lib::ui;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "it",
    about = "Inspect-It - a terminal move-in/move-out inspection checklist."
)]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,

    #[structopt(subcommand)]
    pub command: Command,
}

#[derive(Debug, StructOpt)]
pub enum Command {
    #[structopt(about = "pick an inspection date interactively")]
    Pick {
        #[structopt(help = "currently selected date (YYYY-MM-DD)")]
        date: Option<String>,
    },

    #[structopt(about = "print the month grid")]
    Cal {
        #[structopt(help = "month to show (YYYY-MM), defaults to the current month")]
        month: Option<String>,
    },

    #[structopt(about = "create an inspection from the template")]
    New {
        #[structopt(short = "d", long = "date", help = "inspection date (YYYY-MM-DD)")]
        date: Option<String>,

        #[structopt(
            short = "t",
            long = "type",
            default_value = "move-in",
            help = "move-in, move-out or periodic"
        )]
        inspection_type: InspectionType,

        #[structopt(long = "property", help = "property label, e.g. 'Room 3 / Flat A'")]
        property: Option<String>,

        #[structopt(long = "address")]
        address: Option<String>,

        #[structopt(long = "occupants")]
        occupants: Option<String>,

        #[structopt(long = "notes")]
        notes: Option<String>,
    },

    #[structopt(about = "show an inspection with its section and item ids")]
    Show {
        id: Uuid,
    },

    #[structopt(about = "update one checklist item")]
    Set {
        inspection: Uuid,
        section: Uuid,
        item: Uuid,

        #[structopt(
            long = "condition",
            help = "ok, worn, damaged, missing or n/a"
        )]
        condition: Option<Condition>,

        #[structopt(long = "note")]
        note: Option<String>,

        #[structopt(long = "evidence", help = "evidence reference (photo # / file / email)")]
        evidence: Option<String>,
    },

    #[structopt(about = "list saved inspections")]
    List,

    #[structopt(about = "delete an inspection")]
    Delete {
        id: Uuid,
    },

    #[structopt(about = "export profile and data as JSON")]
    Export {
        #[structopt(parse(from_os_str))]
        output: Option<PathBuf>,
    },

    #[structopt(about = "import a previously exported JSON payload")]
    Import {
        #[structopt(parse(from_os_str))]
        input: PathBuf,
    },

    #[structopt(about = "render the print report of an inspection")]
    Report {
        id: Uuid,

        #[structopt(short = "o", long = "output", parse(from_os_str))]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &'static str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "warn"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    logger.start()?;

    let config = lib::config::load_suitable_config(args.configfile.as_deref())?;
    let store = Store::from_config(&config);

    match args.command {
        Command::Pick { date } => {
            if let Some(picked) = run_picker(&config, date.as_deref())? {
                println!("{}", picked);
            }
        }

        Command::Cal { month } => {
            let view = view_month(month.as_deref());
            let stdout = io::stdout();
            ui::print_month(&mut stdout.lock(), &MonthGrid::new(view), config.locale)?;
        }

        Command::New {
            date,
            inspection_type,
            property,
            address,
            occupants,
            notes,
        } => {
            let date = inspection_date(date.as_deref());
            let mut dataset = store.load();

            let mut inspection =
                Inspection::from_template(&dataset.template, date, inspection_type);
            inspection.property_label = trimmed(property);
            inspection.address = trimmed(address);
            inspection.occupants = trimmed(occupants);
            inspection.notes = trimmed(notes);

            let id = inspection.id;
            dataset.add_inspection(inspection);
            store.save(&mut dataset)?;

            println!("{}", id);
        }

        Command::Show { id } => {
            let dataset = store.load();
            let inspection = dataset
                .find_inspection(id)
                .ok_or_else(|| Error::from(ErrorKind::NotFound))?;

            println!(
                "{}  {}  {}",
                inspection.date,
                inspection.inspection_type.label(),
                inspection.property_label
            );
            for section in &inspection.sections {
                println!();
                println!("{}  {}", section.id, section.title);
                for item in &section.items {
                    println!(
                        "  {}  [{:^7}] {}",
                        item.id,
                        item.condition.label(),
                        item.label
                    );
                }
            }
        }

        Command::Set {
            inspection,
            section,
            item,
            condition,
            note,
            evidence,
        } => {
            let mut dataset = store.load();
            let target = dataset
                .find_inspection_mut(inspection)
                .ok_or_else(|| Error::from(ErrorKind::NotFound))?;

            let patch = ItemPatch {
                condition,
                note,
                evidence_ref: evidence,
            };
            if !target.update_item(section, item, patch) {
                return Err(Error::new(
                    ErrorKind::NotFound,
                    "no such section/item in this inspection",
                )
                .into());
            }

            store.save(&mut dataset)?;
        }

        Command::List => {
            let dataset = store.load();

            if dataset.inspections.is_empty() {
                println!("No saved inspections yet.");
            } else {
                println!(
                    "{:<36}  {:<10}  {:<9}  {:<24}  {:>7}  {:>4}  {:>7}",
                    "ID", "DATE", "TYPE", "PROPERTY", "DAMAGED", "WORN", "MISSING"
                );
                for inspection in &dataset.inspections {
                    let property = if !inspection.property_label.is_empty() {
                        inspection.property_label.as_str()
                    } else if !inspection.address.is_empty() {
                        inspection.address.as_str()
                    } else {
                        "-"
                    };
                    println!(
                        "{:<36}  {:<10}  {:<9}  {:<24}  {:>7}  {:>4}  {:>7}",
                        inspection.id,
                        inspection.date,
                        inspection.inspection_type,
                        property,
                        inspection.summary.damaged,
                        inspection.summary.worn,
                        inspection.summary.missing
                    );
                }
            }
        }

        Command::Delete { id } => {
            let mut dataset = store.load();
            if !dataset.delete_inspection(id) {
                return Err(Error::from(ErrorKind::NotFound).into());
            }
            store.save(&mut dataset)?;
        }

        Command::Export { output } => {
            let path =
                output.unwrap_or_else(|| PathBuf::from(Store::default_export_name()));
            store.export_to(&path)?;
            println!("Exported to {}", path.display());
        }

        Command::Import { input } => {
            let dataset = store.import_from(&input)?;
            println!(
                "Imported {} inspection(s) from {}",
                dataset.inspections.len(),
                input.display()
            );
        }

        Command::Report { id, output } => {
            let dataset = store.load();
            let inspection = dataset
                .find_inspection(id)
                .ok_or_else(|| Error::from(ErrorKind::NotFound))?;
            let profile = store.load_profile();

            match output {
                Some(path) => {
                    let mut file = fs::File::create(&path)?;
                    report::render(&mut file, inspection, &profile, config.locale)?;
                    println!("Report written to {}", path.display());
                }
                None => {
                    let stdout = io::stdout();
                    report::render(&mut stdout.lock(), inspection, &profile, config.locale)?;
                }
            }
        }
    }

    Ok(())
}

/// Malformed dates from the command line degrade to today, mirroring how
/// the picker absorbs bad selected values.
fn inspection_date(date: Option<&str>) -> CalendarDate {
    match date {
        Some(s) => parse_iso_date(s).unwrap_or_else(|| {
            log::warn!("'{}' is not a valid date (YYYY-MM-DD), using today", s);
            CalendarDate::today()
        }),
        None => CalendarDate::today(),
    }
}

fn view_month(month: Option<&str>) -> CalendarDate {
    match month {
        Some(m) => parse_iso_date(&format!("{}-01", m)).unwrap_or_else(|| {
            log::warn!(
                "'{}' is not a valid month (YYYY-MM), showing the current month",
                m
            );
            CalendarDate::today()
        }),
        None => CalendarDate::today(),
    }
}

fn trimmed(value: Option<String>) -> String {
    value.map(|s| s.trim().to_owned()).unwrap_or_default()
}

fn run_picker(
    config: &Config,
    selected: Option<&str>,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let dispatcher = Dispatcher::from_config(config);

    let stdout = io::stdout().into_raw_mode()?;
    let mut screen = AlternateScreen::from(stdout);
    write!(screen, "{}", termion::cursor::Hide)?;

    let mut picker = DatePicker::new(selected);
    picker.open(selected);

    let picked = loop {
        ui::draw_picker(&mut screen, &picker, config.locale)?;

        match dispatcher.next()? {
            Event::Update => {}
            Event::Input(key) => {
                let cmd = config.key_map.get(&key).copied().unwrap_or(Cmd::Noop);
                match picker.handle(cmd) {
                    PickerOutcome::Pending => {}
                    PickerOutcome::Picked(value) => break Some(value),
                    PickerOutcome::Cancelled => break None,
                }
            }
        }
    };

    write!(screen, "{}", termion::cursor::Show)?;
    screen.flush()?;

    Ok(picked)
}
