use std::io::{self, BufWriter, Write};

use fs_err as fs;
use treepack::PackError;

use super::read_layout;
use crate::{
    data::{LayoutConfig, Sheet},
    options::PackOptions,
};

pub fn pack(options: PackOptions) -> anyhow::Result<()> {
    let mut layout = read_layout(&options.layout)?;

    if let Some(container) = options.container {
        layout.container = Some(container);
    }

    let sheet = pack_layout(&layout)?;
    log::info!(
        "Packed {} rects from {} into {}x{}",
        sheet.items.len(),
        layout.file_path.display(),
        sheet.size.0,
        sheet.size.1
    );

    match &options.output {
        Some(path) => {
            let mut file = BufWriter::new(fs::File::create(path)?);
            serde_json::to_writer_pretty(&mut file, &sheet)?;
            file.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            serde_json::to_writer_pretty(&mut handle, &sheet)?;
            writeln!(handle)?;
        }
    }

    Ok(())
}

/// Packs every rect in the layout, into the layout's container if it has one
/// and into the smallest container that fits otherwise.
pub(crate) fn pack_layout(layout: &LayoutConfig) -> Result<Sheet, PackError> {
    let packer = layout.packer()?;
    let sizes = layout.sizes();

    let output = match layout.container {
        Some(container) => packer.try_pack(&sizes, container)?,
        None => packer.pack(&sizes)?,
    };

    log::debug!(
        "{:.1}% of the {}x{} container is occupied",
        output.occupancy() * 100.0,
        output.size().0,
        output.size().1
    );

    Ok(Sheet::new(&layout.rects, &output))
}
