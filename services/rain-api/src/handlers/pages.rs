//! Static HTML page handlers.

use axum::response::Html;

/// Home page template
const HOME_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Raincell Map</title>
    <style>
        body {
            margin: 0;
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
            background: linear-gradient(135deg, #1a365d 0%, #2d4a6f 100%);
            color: white;
            min-height: 100vh;
            display: flex;
            align-items: center;
            justify-content: center;
        }
        .card {
            text-align: center;
            padding: 40px 60px;
            background: rgba(255,255,255,0.08);
            border-radius: 12px;
        }
        h1 { margin: 0 0 8px; font-size: 2rem; font-weight: 600; }
        p { opacity: 0.8; margin: 0 0 24px; }
        a.button {
            display: inline-block;
            padding: 12px 28px;
            background: #61affe;
            color: white;
            text-decoration: none;
            border-radius: 6px;
            font-weight: 500;
        }
        a.button:hover { background: #4d9be8; }
    </style>
</head>
<body>
    <div class="card">
        <h1>Raincell Map</h1>
        <p>Rainfall observations from NetCDF grid datasets</p>
        <a class="button" href="/map">Open the map</a>
    </div>
</body>
</html>"#;

/// Map page template: a Leaflet map fed by the /raincells endpoint
const MAP_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Raincell Map</title>
    <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
    <style>
        body { margin: 0; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; }
        #map { height: 100vh; }
        .panel {
            position: absolute;
            top: 10px;
            right: 10px;
            z-index: 1000;
            background: white;
            padding: 12px 16px;
            border-radius: 8px;
            box-shadow: 0 2px 8px rgba(0,0,0,0.25);
            font-size: 0.85rem;
        }
        .panel label { display: block; margin-bottom: 6px; }
        .panel input { width: 70px; }
        .panel .timestamp { margin-top: 8px; color: #555; }
        .panel button {
            margin-top: 8px;
            padding: 6px 14px;
            background: #1a365d;
            color: white;
            border: none;
            border-radius: 4px;
            cursor: pointer;
        }
    </style>
</head>
<body>
    <div id="map"></div>
    <div class="panel">
        <label>Min mm <input id="min_mm" type="number" value="0" step="0.1"></label>
        <label>Max mm <input id="max_mm" type="number" value="9999" step="0.1"></label>
        <button onclick="loadRaincells()">Refresh</button>
        <div class="timestamp" id="timestamp"></div>
    </div>
    <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
    <script>
        const map = L.map('map').setView([20, 0], 2);
        L.tileLayer('https://tile.openstreetmap.org/{z}/{x}/{y}.png', {
            attribution: '&copy; OpenStreetMap contributors'
        }).addTo(map);

        let markers = L.layerGroup().addTo(map);

        async function loadRaincells() {
            const min = document.getElementById('min_mm').value;
            const max = document.getElementById('max_mm').value;
            const resp = await fetch(`/raincells?min_mm=${min}&max_mm=${max}`);
            const body = await resp.json();

            markers.clearLayers();
            for (const p of body.data) {
                L.circleMarker([p.lat, p.lon], {
                    radius: Math.min(4 + p.mm / 2, 14),
                    color: '#1a66cc',
                    fillColor: '#4d9be8',
                    fillOpacity: 0.6,
                    weight: 1
                }).bindPopup(`${p.mm} mm`).addTo(markers);
            }

            document.getElementById('timestamp').textContent = body.timestamp
                ? `${body.file} @ ${body.timestamp}`
                : `${body.file}: no data`;
        }

        loadRaincells();
    </script>
</body>
</html>"#;

/// GET / - Home page
pub async fn home_handler() -> Html<&'static str> {
    Html(HOME_HTML)
}

/// GET /map - Map page
pub async fn map_handler() -> Html<&'static str> {
    Html(MAP_HTML)
}
