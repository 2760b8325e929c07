use vehiscan::LabelTable;

fn main() {
    let table = LabelTable::coco();
    println!("{} classes mapped", table.len());
    for index in [0, 2, 3, 5, 7, 9, 11, 42, 90] {
        println!("  {:>2} -> {}", index, table.lookup(index));
    }
}
