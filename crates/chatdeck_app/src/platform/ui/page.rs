/// Embedded single-page dashboard. It polls `/api/state` and only re-renders
/// when the `revision` changes.
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Live Chat Dashboard</title>
<style>
*{margin:0;padding:0;box-sizing:border-box}
body{background:#0d1117;color:#c9d1d9;font-family:system-ui,sans-serif;min-height:100vh;display:flex}
aside{width:280px;padding:20px;border-right:1px solid #21262d;background:#161b22;display:flex;flex-direction:column;gap:12px}
aside h2{font-size:.95rem;color:#8b949e}
aside label{font-size:.75rem;color:#8b949e;text-transform:uppercase;letter-spacing:.5px}
aside input{background:#0d1117;border:1px solid #30363d;color:#c9d1d9;padding:8px 10px;border-radius:6px;font-size:.9rem}
aside input:focus{outline:none;border-color:#58a6ff}
.btn{border:none;padding:8px 14px;border-radius:6px;font-size:.9rem;cursor:pointer;color:#fff;text-align:center;text-decoration:none}
.btn-start{background:#238636}.btn-start:hover{background:#2ea043}
.btn-stop{background:#da3633}.btn-stop:hover{background:#f85149}
.btn-export{background:#6e40c9}.btn-export:hover{background:#8957e5}
.hidden{display:none}
main{flex:1;padding:20px 24px;display:flex;flex-direction:column;gap:14px;min-width:0}
main h1{font-size:1.3rem;color:#58a6ff}
.banner{padding:10px 14px;border-radius:6px;font-size:.9rem}
.banner.info{background:#0c2d6b;color:#a5d6ff}
.banner.success{background:#0f3d1e;color:#7ee787}
.banner.error{background:#490202;color:#ffa198}
.count{font-size:.8rem;color:#8b949e}
.table-wrap{flex:1;overflow:auto;border:1px solid #21262d;border-radius:6px}
table{width:100%;border-collapse:collapse;font-size:.85rem}
th{position:sticky;top:0;background:#161b22;text-align:left;padding:8px 10px;border-bottom:1px solid #30363d;color:#8b949e}
td{padding:6px 10px;border-bottom:1px solid #21262d;vertical-align:top;white-space:pre-wrap;word-break:break-word}
td.time{white-space:nowrap;color:#8b949e}
td.author{white-space:nowrap;color:#d2a8ff}
</style>
</head>
<body>
<aside>
  <h2>Input live video ID</h2>
  <label for="video-id">Video ID</label>
  <input id="video-id" type="text" autocomplete="off" placeholder="e.g. jfKfPfyJRdk">
  <button id="start" class="btn btn-start">Start extracting live chat</button>
  <button id="stop" class="btn btn-stop hidden">Stop</button>
  <div id="download" class="hidden">
    <h2>Download chat data</h2>
    <a id="export" class="btn btn-export" href="/api/export">Download as CSV</a>
  </div>
</aside>
<main>
  <h1>Live Chat Dashboard</h1>
  <div id="banner" class="banner hidden"></div>
  <div id="count" class="count"></div>
  <div class="table-wrap">
    <table>
      <thead><tr><th>Time</th><th>Author</th><th>Message</th></tr></thead>
      <tbody id="rows"></tbody>
    </table>
  </div>
</main>
<script>
const $ = (id) => document.getElementById(id);
let revision = -1;

function cell(text, cls) {
  const td = document.createElement('td');
  td.textContent = text;
  if (cls) td.className = cls;
  return td;
}

function render(view) {
  if (view.revision === revision) return;
  revision = view.revision;

  $('start').classList.toggle('hidden', !view.can_start);
  $('stop').classList.toggle('hidden', !view.can_stop);
  $('download').classList.toggle('hidden', !view.can_export);
  if (view.export_filename) $('export').setAttribute('download', view.export_filename);

  const banner = $('banner');
  if (view.banner) {
    banner.className = 'banner ' + view.banner.severity;
    banner.textContent = view.banner.text;
  } else {
    banner.className = 'banner hidden';
  }

  $('count').textContent = view.row_count ? view.row_count + ' messages' : '';
  const body = $('rows');
  const frag = document.createDocumentFragment();
  for (const row of view.rows) {
    const tr = document.createElement('tr');
    tr.append(cell(row.Time, 'time'), cell(row.Author, 'author'), cell(row.Message));
    frag.append(tr);
  }
  body.replaceChildren(frag);
}

async function refresh() {
  try {
    const res = await fetch('/api/state');
    if (res.ok) render(await res.json());
  } catch (_) {}
}

async function post(path, payload) {
  const res = await fetch(path, {
    method: 'POST',
    headers: {'Content-Type': 'application/json'},
    body: JSON.stringify(payload || {}),
  });
  render(await res.json());
}

$('start').addEventListener('click', () => post('/api/start', {video_id: $('video-id').value}));
$('stop').addEventListener('click', () => post('/api/stop'));
$('video-id').addEventListener('keydown', (e) => { if (e.key === 'Enter') $('start').click(); });

refresh();
setInterval(refresh, 1000);
</script>
</body>
</html>
"##;
