//! Static HTML pages served by the redirect endpoint.
//!
//! Every page shares one layout: a centered card on the Spotify green
//! background. The pages are assembled at compile time, so handlers hand out
//! `&'static str` bodies and nothing is rendered per request.

macro_rules! page {
    ($title:literal, $heading:literal, $($paragraph:literal),+ $(,)?) => {
        concat!(
            "<!DOCTYPE html>\n",
            "<html lang=\"en\">\n",
            "<head>\n",
            "    <meta charset=\"UTF-8\">\n",
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
            "    <title>", $title, "</title>\n",
            "    <style>\n",
            "        body {\n",
            "            font-family: Arial, sans-serif;\n",
            "            display: flex;\n",
            "            justify-content: center;\n",
            "            align-items: center;\n",
            "            height: 100vh;\n",
            "            margin: 0;\n",
            "            background-color: #1DB954;\n",
            "            color: white;\n",
            "            text-align: center;\n",
            "        }\n",
            "        .container {\n",
            "            background-color: rgba(0,0,0,0.7);\n",
            "            padding: 2rem;\n",
            "            border-radius: 10px;\n",
            "        }\n",
            "    </style>\n",
            "</head>\n",
            "<body>\n",
            "    <div class=\"container\">\n",
            "        <h1>", $heading, "</h1>\n",
            $("        <p>", $paragraph, "</p>\n",)+
            "    </div>\n",
            "</body>\n",
            "</html>\n",
        )
    };
}

/// Served on `GET /`.
pub const LANDING_PAGE: &str = page!(
    "Spotify Authorization",
    "Spotify Authorization",
    "Please complete the authorization process on your device.",
    "This page confirms that you've authorized the application.",
);

/// Served when the callback carried an authorization code.
pub const SUCCESS_PAGE: &str = page!(
    "Authorization Successful",
    "Authorization Successful!",
    "Your display received the authorization code.",
    "You can close this window and return to your device.",
);

/// Served when the callback arrived without an authorization code.
pub const FAILURE_PAGE: &str = page!(
    "Authorization Failed",
    "Authorization Failed!",
    "No authorization code was found in the redirect.",
    "Please restart pairing on your device.",
);

pub const NOT_FOUND_PAGE: &str = page!(
    "404 Not Found",
    "404 Not Found",
    "The requested page does not exist on this device.",
);
