use airship::request::{audience, notification};
use airship::{Client, ClientOptions, Endpoint, PushRequest};
use argparse::{ArgumentParser, Store, StoreOption, StoreTrue};

// An example client sending a push to an alias, or to every device
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Sync + Send>> {
    tracing_subscriber::fmt().init();

    let mut app_key = String::new();
    let mut master_secret = String::new();
    let mut alias: Option<String> = None;
    let mut message = String::from("Ch-check it out!");
    let mut endpoint: Option<String> = None;
    let mut list_channels = false;

    {
        let mut ap = ArgumentParser::new();
        ap.set_description("Urban Airship push");
        ap.refer(&mut app_key)
            .add_option(&["-k", "--app_key"], Store, "Application key")
            .required();
        ap.refer(&mut master_secret)
            .add_option(&["-s", "--master_secret"], Store, "Master secret")
            .required();
        ap.refer(&mut alias)
            .add_option(&["-a", "--alias"], StoreOption, "Alias to push to, everyone if not set");
        ap.refer(&mut message)
            .add_option(&["-m", "--message"], Store, "Notification message");
        ap.refer(&mut endpoint)
            .add_option(&["-e", "--endpoint"], StoreOption, "Custom API base URL");
        ap.refer(&mut list_channels)
            .add_option(&["-l", "--list_channels"], StoreTrue, "List the channels after the push");
        ap.parse_args_or_exit();
    }

    let endpoint = match endpoint {
        Some(base_url) => Endpoint::Custom(base_url),
        None => Endpoint::Production,
    };

    let client = Client::with_options(app_key, master_secret, ClientOptions::new(endpoint));

    let audience = match alias {
        Some(ref alias) => audience::alias(alias),
        None => audience::all(),
    };

    let push = PushRequest::new()
        .set_audience(audience)
        .set_notification(notification::simple_alert(&message)?)
        .set_device_types(audience::all());

    let response = client.send(&push).await?;
    println!("Sent: {:?}", response.push_ids());

    if list_channels {
        let mut channels = client.list_channels(Some(100))?;

        while let Some(channel) = channels.next().await? {
            println!("{} ({}), opted in: {}", channel.channel_id, channel.device_type, channel.opt_in);
        }
    }

    Ok(())
}
