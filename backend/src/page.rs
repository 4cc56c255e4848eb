//! Calculator page served at `/`.
//!
//! The page talks to the server over `/ws`: every input change sends
//! `EVALUATE` and `PLOT` commands and redraws the panels from the replies.

pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Parallel performance calculator</title>
<style>
  body { font-family: sans-serif; margin: 0; display: flex; }
  aside { width: 300px; padding: 16px; background: #f4f4f6; min-height: 100vh; }
  main { flex: 1; padding: 16px; }
  section { border: 1px solid #ccc; border-radius: 8px; padding: 12px 16px; margin-bottom: 16px; }
  label { display: block; margin: 6px 0; }
  input { width: 180px; }
  .error { color: #b00020; }
  .formula code { display: block; margin: 4px 0; }
  hr { border: none; border-top: 1px solid #ccc; }
</style>
</head>
<body>
<aside>
  <h2>Formulas</h2>
  <div id="formulas"></div>
</aside>
<main>
  <section>
    <h2>Amdahl's Law calculator</h2>
    <label>Serial fraction <input id="serial_fraction" type="number" min="0" max="1" step="0.01" value="0.46"></label>
    <label>Number of processors <input id="num_processors" type="number" min="1" max="1000" step="1" value="16"></label>
    <p id="amdahl_result"></p>
    <div id="amdahl_plot"></div>
  </section>
  <section>
    <h2>Speedup (SIMD/SISD)</h2>
    <label>SIMD time <input id="simd_time" type="number" step="1" value="3.0"></label>
    <label>SISD time <input id="sisd_time" type="number" step="1" value="1.2"></label>
    <p id="simd_result"></p>
  </section>
  <section>
    <h2>Efficiency</h2>
    <label>Speedup coefficients (,) <input id="speedups" type="text" value="1.35, 1.9, 2.1"></label>
    <label>Processor counts (,) <input id="processors" type="text" value="2, 8, 16"></label>
    <p id="efficiency_result"></p>
    <div id="efficiency_plot"></div>
  </section>
  <section>
    <h2>Balanced pipeline</h2>
    <label>Task rank (k) <input id="k" type="number" min="1" max="1000" step="1" value="8"></label>
    <label>Number of stages (p) <input id="p" type="number" min="1" max="1000" step="1" value="8"></label>
    <label>Stage time (t) <input id="t" type="number" min="0.1" max="1000" step="0.1" value="0.1"></label>
    <p id="pipeline_result"></p>
  </section>
  <p id="status" class="error"></p>
</main>
<script>
const numeric = ["serial_fraction", "simd_time", "sisd_time", "t"];
const integer = ["num_processors", "k", "p"];
const text = ["speedups", "processors"];

function formValues() {
  const values = {};
  numeric.forEach(id => values[id] = parseFloat(document.getElementById(id).value));
  integer.forEach(id => values[id] = parseInt(document.getElementById(id).value, 10));
  text.forEach(id => values[id] = document.getElementById(id).value);
  return values;
}

function show(id, outcome, render) {
  const el = document.getElementById(id);
  if (outcome.status === "ok") {
    el.className = "";
    el.textContent = render(outcome);
  } else {
    el.className = "error";
    el.textContent = outcome.message;
  }
}

function renderReport(report) {
  show("amdahl_result", report.amdahl, r => "Speedup: " + r.speedup);
  show("simd_result", report.simd, r => "Speedup ratio: " + r.ratio);
  show("efficiency_result", report.efficiency, r => "Efficiency: " + r.efficiencies.join(", "));
  show("pipeline_result", report.pipeline,
       r => "Speedup: " + r.speedup + "   Efficiency: " + r.efficiency);
}

function renderFormulas(formulas) {
  const root = document.getElementById("formulas");
  root.innerHTML = "";
  formulas.forEach(f => {
    const block = document.createElement("div");
    block.className = "formula";
    const title = document.createElement("h4");
    title.textContent = f.title;
    const latex = document.createElement("code");
    latex.textContent = f.latex;
    block.append(title, latex);
    f.symbols.forEach(s => {
      const line = document.createElement("div");
      line.textContent = s.symbol + " - " + s.meaning;
      block.append(line);
    });
    block.append(document.createElement("hr"));
    root.append(block);
  });
}

const ws = new WebSocket((location.protocol === "https:" ? "wss://" : "ws://") + location.host + "/ws");

function refresh() {
  if (ws.readyState !== WebSocket.OPEN) return;
  const payload = JSON.stringify(formValues());
  ws.send("EVALUATE:" + payload);
  ws.send("PLOT:amdahl:" + payload);
  ws.send("PLOT:efficiency:" + payload);
}

ws.onopen = refresh;
ws.onmessage = event => {
  const data = event.data;
  const split = data.indexOf(":");
  const kind = data.slice(0, split);
  const body = JSON.parse(data.slice(split + 1));
  if (kind === "REPORT_UPDATE") {
    document.getElementById("status").textContent = "";
    renderReport(body);
  } else if (kind === "FORMULAS_UPDATE") {
    renderFormulas(body);
  } else if (kind === "PLOT_UPDATE") {
    document.getElementById(body.name + "_plot").innerHTML = body.svg;
  } else if (kind === "ERROR_UPDATE") {
    document.getElementById("status").textContent = body.message;
  }
};
ws.onclose = () => {
  document.getElementById("status").textContent = "Connection to the server was lost.";
};

document.querySelectorAll("input").forEach(input => input.addEventListener("input", refresh));
</script>
</body>
</html>
"##;
