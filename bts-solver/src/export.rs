use crate::lp::{LinearProgram, Sense};
use std::io::Write;

// The objective row name shared by both formats
const OBJECTIVE: &str = "profit";

/// Export the program to free-form `.mps` format.
pub fn export_mps(program: &LinearProgram, buffer: &mut impl Write) -> Result<(), std::io::Error> {
    // MPS is a somewhat archaic format, but is easy enough to generate.
    // https://www.ibm.com/docs/en/icos/22.1.2?topic=standard-records-in-mps-format
    // is a good reference.

    writeln!(buffer, "NAME {}", program.name())?;

    // MPS defaults to minimization, so we say otherwise
    writeln!(buffer, "OBJSENSE")?;
    writeln!(buffer, "    MAX")?;

    writeln!(buffer, "ROWS")?;
    writeln!(buffer, " N    {OBJECTIVE}")?;
    for row in program.rows() {
        let kind = match row.sense {
            Sense::Eq => 'E',
            Sense::Le => 'L',
            Sense::Ge => 'G',
        };
        writeln!(buffer, " {kind}    {}", row.name)?;
    }

    // The rows are stored row-wise, but MPS wants the matrix column by column
    let mut entries: Vec<Vec<(&str, f64)>> = vec![Vec::new(); program.columns().len()];
    for row in program.rows() {
        for &(column, weight) in row.terms.iter() {
            entries[column.index()].push((row.name.as_str(), weight));
        }
    }

    writeln!(buffer, "COLUMNS")?;
    for (spec, column) in program.columns().iter().zip(entries) {
        if spec.objective != 0.0 {
            writeln!(buffer, "    {}    {OBJECTIVE}    {}", spec.name, spec.objective)?;
        }
        for (row, weight) in column {
            writeln!(buffer, "    {}    {row}    {weight}", spec.name)?;
        }
    }

    writeln!(buffer, "RHS")?;
    for row in program.rows() {
        if row.rhs != 0.0 {
            writeln!(buffer, "    RHS    {}    {}", row.name, row.rhs)?;
        }
    }

    // Now we specify the domains for each variable.
    writeln!(buffer, "BOUNDS")?;
    for spec in program.columns() {
        let name = &spec.name;
        if spec.lower == spec.upper {
            writeln!(buffer, " FX BND    {name}    {}", spec.lower)?;
            continue;
        }

        if spec.lower.is_finite() {
            // zero is the default lower bound
            if spec.lower != 0.0 {
                writeln!(buffer, " LO BND    {name}    {}", spec.lower)?;
            }
        } else {
            writeln!(buffer, " MI BND    {name}")?;
        }

        if spec.upper.is_finite() {
            writeln!(buffer, " UP BND    {name}    {}", spec.upper)?;
        } else {
            writeln!(buffer, " PL BND    {name}")?;
        }
    }

    writeln!(buffer, "ENDATA")?;
    Ok(())
}

/// Export the program to CPLEX `.lp` format.
pub fn export_lp(program: &LinearProgram, buffer: &mut impl Write) -> Result<(), std::io::Error> {
    writeln!(buffer, "\\ {}", program.name())?;
    writeln!(buffer, "Maximize")?;
    write!(buffer, " {OBJECTIVE}:")?;
    write_terms(
        buffer,
        program
            .columns()
            .iter()
            .filter(|spec| spec.objective != 0.0)
            .map(|spec| (spec.name.as_str(), spec.objective)),
    )?;
    writeln!(buffer)?;

    writeln!(buffer, "Subject To")?;
    for row in program.rows() {
        write!(buffer, " {}:", row.name)?;
        write_terms(
            buffer,
            row.terms
                .iter()
                .map(|&(column, weight)| (program.column(column).name.as_str(), weight)),
        )?;
        writeln!(buffer, " {} {}", row.sense, row.rhs)?;
    }

    writeln!(buffer, "Bounds")?;
    for spec in program.columns() {
        let name = &spec.name;
        match (spec.lower.is_finite(), spec.upper.is_finite()) {
            _ if spec.lower == spec.upper => writeln!(buffer, " {name} = {}", spec.lower)?,
            (true, true) => writeln!(buffer, " {} <= {name} <= {}", spec.lower, spec.upper)?,
            (true, false) => writeln!(buffer, " {name} >= {}", spec.lower)?,
            (false, true) => writeln!(buffer, " -inf <= {name} <= {}", spec.upper)?,
            (false, false) => writeln!(buffer, " {name} free")?,
        }
    }

    writeln!(buffer, "End")?;
    Ok(())
}

// LP files limit the line length, so long expressions are wrapped every few terms
fn write_terms<'a>(
    buffer: &mut impl Write,
    terms: impl Iterator<Item = (&'a str, f64)>,
) -> Result<(), std::io::Error> {
    let mut empty = true;
    for (i, (name, weight)) in terms.enumerate() {
        if i > 0 && i % 8 == 0 {
            write!(buffer, "\n   ")?;
        }
        let sign = if weight < 0.0 { '-' } else { '+' };
        write!(buffer, " {sign} {} {name}", weight.abs())?;
        empty = false;
    }
    if empty {
        // an empty expression still needs a term
        write!(buffer, " 0")?;
    }
    Ok(())
}
