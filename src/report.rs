use std::io::{self, Write};

use crate::calendar::{month_name, Locale};
use crate::inspection::Inspection;
use crate::store::Profile;

const RULE: &str = "----------------------------------------------------------------";

/// Renders the print-formatted inspection report. Everything is plain
/// text so the output can go to a terminal, a file, or a printer spool
/// unchanged.
pub fn render<W: Write>(
    w: &mut W,
    inspection: &Inspection,
    profile: &Profile,
    locale: Locale,
) -> io::Result<()> {
    let date = inspection.date;

    writeln!(w, "{}", RULE)?;
    writeln!(w, "{}", or_dash(&profile.org))?;
    writeln!(w, "Inspection Report")?;
    writeln!(w, "{}", RULE)?;
    writeln!(w, "Prepared by: {}", or_dash(&profile.user))?;
    writeln!(
        w,
        "Date:        {} {} {}",
        date.day(),
        month_name(date.month(), locale),
        date.year()
    )?;
    writeln!(w, "Type:        {}", inspection.inspection_type.label())?;
    writeln!(w, "Property:    {}", or_dash(&inspection.property_label))?;
    writeln!(w, "Address:     {}", or_dash(&inspection.address))?;
    writeln!(w, "Occupants:   {}", or_dash(&inspection.occupants))?;
    writeln!(w, "Generated:   {}", chrono::Local::now().to_rfc3339())?;

    if !inspection.notes.is_empty() {
        writeln!(w)?;
        writeln!(w, "General notes")?;
        writeln!(w, "{}", inspection.notes)?;
    }

    let summary = &inspection.summary;
    writeln!(w)?;
    writeln!(
        w,
        "Summary: {} items | {} damaged | {} worn | {} missing",
        summary.total, summary.damaged, summary.worn, summary.missing
    )?;

    for section in &inspection.sections {
        writeln!(w)?;
        writeln!(w, "{}", section.title)?;
        writeln!(w, "{}", "-".repeat(section.title.len()))?;

        for item in &section.items {
            writeln!(w, "  [{:^7}] {}", item.condition.label(), item.label)?;
            if !item.note.is_empty() {
                writeln!(w, "            Note: {}", item.note)?;
            }
            if !item.evidence_ref.is_empty() {
                writeln!(w, "            Evidence: {}", item.evidence_ref)?;
            }
        }
    }

    writeln!(w)?;
    writeln!(w, "{}", RULE)?;
    writeln!(w, "Tenant                          Landlord / Agent")?;
    writeln!(w)?;
    writeln!(w, "____________________            ____________________")?;
    writeln!(w, "Signature                       Signature")?;

    Ok(())
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() {
        "-"
    } else {
        s
    }
}
