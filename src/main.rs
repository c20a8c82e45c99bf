#[actix_web::main]
async fn main() -> std::io::Result<()> {
    clinicpost_lib::run().await
}
