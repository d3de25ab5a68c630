fn main() {
    springnet_tasks::entry_points::relax_main();
}
