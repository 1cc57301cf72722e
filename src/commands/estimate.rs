use treepack::estimate_size;

use super::read_layout;
use crate::options::EstimateOptions;

pub fn estimate(options: EstimateOptions) -> anyhow::Result<()> {
    let layout = read_layout(&options.layout)?;

    let (width, height) = estimate_size(&layout.sizes(), layout.padding(), options.mode);
    log::info!(
        "Estimated {}x{} for {} rects using {}",
        width,
        height,
        layout.rects.len(),
        options.mode
    );

    println!("{}x{}", width, height);
    Ok(())
}
