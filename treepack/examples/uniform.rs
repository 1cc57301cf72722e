use treepack::RecursivePacker;

fn main() {
    env_logger::init();

    let inputs: Vec<(u32, u32)> = (0..5).map(|_| (128, 128)).collect();

    let packer = RecursivePacker::new().max_size((512, 512));
    let result = packer.pack(&inputs);

    println!("Pack result: {:#?}", result);
}
