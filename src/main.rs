use folio::ui::output;

fn main() {
    if let Err(err) = folio::cli::run() {
        output::error(format!("{:#}", err));
        std::process::exit(1);
    }
}
