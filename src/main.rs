/*

Copyright 2025 Lealt

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.

*/

use dotenvy::dotenv;
use tracing::info;

mod bot;
mod commands;
mod config;
mod constants;
mod env;
mod functions;
mod telemetry;

pub use bot::{Context, Data, Error};

use functions::audio::{self, ChatAudio};

#[tokio::main]
async fn main() -> Result<(), bot::Error> {
    dotenv().ok();
    telemetry::init_tracing();

    let token = env::discord_token()?;
    let config = config::GameConfig::from_env()?;
    info!(
        tiles = config.tile_count,
        faces = ?config.faces,
        delay_ms = config.mismatch_delay.as_millis() as u64,
        "game settings loaded"
    );

    let mut chat_audio = ChatAudio::new(config.assets.clone());
    chat_audio.preload(&audio::all_sounds())?;

    let data = Data {
        config,
        audio: chat_audio,
    };
    let framework = bot::build_framework(bot::prefix_options(), data);
    bot::run_client(token, bot::gateway_intents(), framework).await
}
