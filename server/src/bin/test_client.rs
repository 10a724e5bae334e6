use futures_util::{SinkExt, Stream, StreamExt};
use shared::{decode_server, encode, ClientMessage, ServerMessage};
use std::env;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tokio_tungstenite::{connect_async, tungstenite::Message};

// Print every envelope that arrives within the window
async fn print_incoming<S>(read: &mut S, window: Duration)
where
    S: Stream<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    while let Ok(Some(frame)) = timeout(window, read.next()).await {
        match frame {
            Ok(Message::Text(text)) => match decode_server(text.as_str()) {
                Ok(message) => println!("  <- {:?}", message),
                Err(e) => println!("  <- undecodable frame ({}): {}", e, text.as_str()),
            },
            Ok(other) => println!("  <- {:?}", other),
            Err(e) => {
                println!("Connection error: {}", e);
                return;
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let url = env::args()
        .nth(1)
        .unwrap_or_else(|| "ws://127.0.0.1:8080".to_string());

    println!("Connecting to {}", url);
    let (ws_stream, _) = connect_async(url.as_str()).await?;
    let (mut write, mut read) = ws_stream.split();

    // The first two frames are always init and the player snapshot
    for _ in 0..2 {
        match read.next().await {
            Some(Ok(Message::Text(text))) => match decode_server(text.as_str())? {
                ServerMessage::Init {
                    player_id,
                    player_state,
                    ..
                } => {
                    println!(
                        "Joined as {} ({}) at ({}, {})",
                        player_id, player_state.name, player_state.x, player_state.y
                    );
                }
                ServerMessage::CurrentPlayers { players } => {
                    println!("{} player(s) online", players.len());
                }
                other => println!("Unexpected greeting: {:?}", other),
            },
            other => {
                println!("Expected greeting but got: {:?}", other);
                return Ok(());
            }
        }
    }

    let script = ["right", "right", "down", "left", "up", "up"];
    for direction in script {
        let message = ClientMessage::Movement {
            direction: direction.to_string(),
        };
        println!("-> {:?}", message);
        write.send(Message::text(encode(&message)?)).await?;
        print_incoming(&mut read, Duration::from_millis(200)).await;
        sleep(Duration::from_millis(300)).await;
    }

    let chat = ClientMessage::Chat {
        message: "hello from test_client".to_string(),
    };
    println!("-> {:?}", chat);
    write.send(Message::text(encode(&chat)?)).await?;
    print_incoming(&mut read, Duration::from_millis(500)).await;

    println!("Closing connection");
    write.send(Message::Close(None)).await?;
    println!("Test client finished");

    Ok(())
}
