use std::env;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};
use log::{info, warn};

use serde::Deserialize;
use rs_lm_core::io::list_files;
use rs_lm_core::model::generator::CORPUS_EXTENSION;
use rs_lm_core::{Generator, ModelConfig, ModelError};

const DEFAULT_DATA_FOLDER: &str = "./data";
const DEFAULT_WINDOW_LENGTH: usize = 3;

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	model: Option<String>,
	initial: Option<String>,
	length: Option<usize>,
}

struct SharedData {
	data_folder: PathBuf,
	generator: Generator,
}

/// Builds a generator from the data folder, or an empty one if the folder
/// cannot be used.
fn load_generator(data_folder: &Path, config: &ModelConfig) -> Result<Generator, ModelError> {
	match Generator::new(data_folder, config) {
		Err(ModelError::InvalidPath(e)) => {
			warn!("{e}, starting without models");
			Ok(Generator::empty(config.clone()))
		}
		other => other,
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates text with the named model, starting from `initial` and
/// stopping at `length` characters (default 200) or at an unseen window.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let model = match &query.model {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty model name"),
	};
	// An initial text shorter than the window is echoed back, not rejected
	let initial = match &query.initial {
		Some(s) => s.as_str(),
		None => return HttpResponse::BadRequest().body("Missing initial text"),
	};
	let length = query.length.unwrap_or(200);

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	match shared_data.generator.generate(model, initial, length) {
		Ok(result) => HttpResponse::Ok().body(result),
		Err(e @ ModelError::UnknownModel(_)) => HttpResponse::BadRequest().body(e.to_string()),
		Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

/// HTTP GET endpoint `/v1/models`
///
/// Lists the corpora available in the data folder.
#[get("/v1/models")]
async fn get_models(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let folder = match data.lock() {
		Ok(m) => m.data_folder.clone(),
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	match list_files(&folder, CORPUS_EXTENSION) {
		Ok(files) => {
			let suffix = format!(".{CORPUS_EXTENSION}");
			let names: Vec<&str> = files.iter().map(|f| f.trim_end_matches(&suffix)).collect();
			HttpResponse::Ok().body(names.join("\n"))
		}
		Err(_) => HttpResponse::InternalServerError().body("Failed to list models"),
	}
}

/// HTTP GET endpoint `/v1/loaded_models`
///
/// Lists the trained models.
#[get("/v1/loaded_models")]
async fn get_loaded_models(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	HttpResponse::Ok().body(shared_data.generator.get_model_names().join("\n"))
}

/// HTTP PUT endpoint `/v1/load_models`
///
/// Retrains every corpus with a new window length and seed.
#[put("/v1/load_models")]
async fn put_models(data: web::Data<Mutex<SharedData>>, query: web::Query<ModelConfig>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	match Generator::new(&shared_data.data_folder, &query) {
		Ok(generator) => {
			info!(
				"retrained {} models, window length {} -> {}",
				generator.get_model_names().len(),
				shared_data.generator.config().window_length(),
				generator.config().window_length()
			);
			shared_data.generator = generator;
			HttpResponse::Ok().body("Models loaded successfully")
		}
		Err(e @ ModelError::InvalidPath(_)) => HttpResponse::BadRequest().body(e.to_string()),
		Err(e) => HttpResponse::InternalServerError().body(format!("Failed to load models: {e}")),
	}
}

/// Main entry point for the server.
///
/// Trains one model per corpus of the data folder (`RS_LM_DATA`, default
/// `./data`) with window length `RS_LM_WINDOW_LENGTH` (default 3), wraps the
/// generator in a `Mutex` and starts an Actix-web HTTP server.
///
/// # Notes
/// - The server binds to 127.0.0.1:5000.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();

	let data_folder = PathBuf::from(env::var("RS_LM_DATA").unwrap_or_else(|_| DEFAULT_DATA_FOLDER.to_owned()));
	let window_length = match env::var("RS_LM_WINDOW_LENGTH") {
		Ok(s) => s.parse().map_err(|_| {
			std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("Invalid RS_LM_WINDOW_LENGTH: {s}"))
		})?,
		Err(_) => DEFAULT_WINDOW_LENGTH,
	};
	let config = ModelConfig::new(window_length).map_err(std::io::Error::other)?;

	let generator = load_generator(&data_folder, &config).map_err(std::io::Error::other)?;
	info!("serving {} models from {}", generator.get_model_names().len(), data_folder.display());

	let shared_data = SharedData { data_folder, generator };
	let shared_model = web::Data::new(Mutex::new(shared_data));

	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.app_data(shared_model.clone())
			.service(get_generated)
			.service(get_models)
			.service(put_models)
			.service(get_loaded_models)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}
