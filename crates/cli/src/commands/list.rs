//! `cb-cli list` - print every contact.

use std::io::Write;
use std::path::Path;

use contactbook_core::Contact;
use contactbook_web::db::{ContactRepository, open_existing};

use super::CommandError;

/// Write all contacts to `out`, one `id\tname\tphone` line each.
///
/// The database is opened read-only; a missing file is an error, not
/// something to create.
///
/// # Errors
///
/// Returns `CommandError` if the database cannot be read or output fails.
pub async fn run(
    data_dir: &Path,
    database_file: &str,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let pool = open_existing(data_dir, database_file).await?;
    let contacts = ContactRepository::new(&pool).list_all().await?;
    pool.close().await;

    write_contacts(&contacts, out)?;
    Ok(())
}

fn write_contacts(contacts: &[Contact], out: &mut impl Write) -> std::io::Result<()> {
    for contact in contacts {
        writeln!(out, "{}\t{}\t{}", contact.id, contact.name, contact.phone)?;
    }
    out.flush()
}
