pub fn render_index(spin_duration_ms: u64, user_count: usize) -> String {
    INDEX_HTML
        .replace("{{SPIN_DURATION_MS}}", &spin_duration_ms.to_string())
        .replace("{{USER_COUNT}}", &user_count.to_string())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Tooli - Spin</title>
  <style>
    :root {
      --bg: #f4f6fb;
      --ink: #1f2933;
      --muted: #66788a;
      --accent: #4f46e5;
      --card: #ffffff;
      --shadow: 0 8px 24px rgba(31, 41, 51, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: var(--bg);
      color: var(--ink);
      font-family: "Inter", "Segoe UI", sans-serif;
    }

    nav {
      display: flex;
      justify-content: space-between;
      align-items: center;
      padding: 16px 24px;
      background: var(--card);
      box-shadow: var(--shadow);
    }

    nav h1 {
      margin: 0;
      font-size: 1.4rem;
    }

    main {
      max-width: 1200px;
      margin: 0 auto;
      padding: 24px 16px;
      display: grid;
      gap: 24px;
      grid-template-columns: repeat(auto-fit, minmax(340px, 1fr));
    }

    section {
      background: var(--card);
      border-radius: 16px;
      box-shadow: var(--shadow);
      padding: 20px;
    }

    h2 {
      margin-top: 0;
      font-size: 1.1rem;
    }

    .wheel-wrap {
      position: relative;
      display: grid;
      place-items: center;
      gap: 16px;
    }

    .pointer {
      width: 0;
      height: 0;
      border-left: 14px solid transparent;
      border-right: 14px solid transparent;
      border-top: 24px solid var(--ink);
      margin-bottom: -18px;
      z-index: 1;
    }

    canvas {
      max-width: 100%;
    }

    button {
      border: none;
      border-radius: 10px;
      padding: 10px 16px;
      font-size: 0.95rem;
      cursor: pointer;
      background: var(--accent);
      color: white;
    }

    button.ghost {
      background: transparent;
      color: var(--muted);
      border: 1px solid #d5dbe3;
      padding: 4px 10px;
    }

    button:disabled {
      opacity: 0.5;
      cursor: wait;
    }

    input[type="text"], input[type="number"], textarea {
      border: 1px solid #d5dbe3;
      border-radius: 8px;
      padding: 8px 10px;
      font: inherit;
    }

    input[type="number"] {
      width: 70px;
    }

    ul {
      list-style: none;
      margin: 0;
      padding: 0;
    }

    li {
      display: flex;
      align-items: center;
      gap: 8px;
      padding: 6px 0;
      border-bottom: 1px solid #eef1f5;
    }

    li .name {
      flex: 1;
    }

    .swatch {
      width: 12px;
      height: 12px;
      border-radius: 50%;
    }

    .result {
      min-height: 1.6em;
      font-size: 1.3rem;
      font-weight: 600;
    }

    .muted {
      color: var(--muted);
      font-size: 0.85rem;
    }

    .row {
      display: flex;
      gap: 8px;
      flex-wrap: wrap;
      margin-top: 12px;
    }

    .status.error {
      color: #c53030;
    }
  </style>
</head>
<body>
  <nav>
    <h1>Tooli</h1>
    <span class="muted"><span id="user-count">{{USER_COUNT}}</span> participants</span>
  </nav>
  <main>
    <section class="wheel-wrap">
      <div class="pointer"></div>
      <canvas id="wheel" width="420" height="420"></canvas>
      <button id="spin">Spin</button>
      <div class="result" id="result"></div>
      <div class="status muted" id="status"></div>
    </section>

    <section>
      <h2>Participants</h2>
      <form id="add-form" class="row">
        <input type="text" id="new-name" maxlength="255" placeholder="Add a name" required />
        <button type="submit">Add</button>
      </form>
      <ul id="users"></ul>
      <div class="row">
        <a href="/api/users/export?format=json">Export JSON</a>
        <a href="/api/users/export?format=csv">Export CSV</a>
      </div>
    </section>

    <section>
      <h2>Recent spins</h2>
      <ul id="history"></ul>
      <div class="row">
        <a href="/api/history/export?format=json">Export history</a>
        <button class="ghost" id="clear-history">Clear</button>
      </div>
    </section>

    <section>
      <h2>Analytics</h2>
      <div id="summary" class="muted"></div>
      <ul id="leaderboard"></ul>
      <div class="row">
        <button class="ghost" id="reset-all">Reset history and stats</button>
      </div>
    </section>
  </main>

  <script>
    const SPIN_DURATION_MS = {{SPIN_DURATION_MS}};
    const canvas = document.getElementById('wheel');
    const ctx = canvas.getContext('2d');
    const spinButton = document.getElementById('spin');
    const resultEl = document.getElementById('result');
    const statusEl = document.getElementById('status');
    let segments = [];
    let rotation = 0;

    const setStatus = (message, tone) => {
      statusEl.textContent = message;
      statusEl.className = `status muted ${tone || ''}`;
    };

    const api = async (path, options = {}) => {
      const res = await fetch(path, options);
      if (!res.ok) {
        throw new Error((await res.text()) || `Request failed (${res.status})`);
      }
      return res.status === 204 ? null : res.json();
    };

    const jsonBody = (method, body) => ({
      method,
      headers: { 'content-type': 'application/json' },
      body: JSON.stringify(body)
    });

    const drawWheel = () => {
      const size = canvas.width;
      const radius = size / 2 - 4;
      ctx.clearRect(0, 0, size, size);
      ctx.save();
      ctx.translate(size / 2, size / 2);
      ctx.rotate(rotation);
      let start = -Math.PI / 2;
      segments.forEach((segment, index) => {
        const sweep = segment.probability * Math.PI * 2;
        ctx.beginPath();
        ctx.moveTo(0, 0);
        ctx.arc(0, 0, radius, start, start + sweep);
        ctx.closePath();
        ctx.fillStyle = segment.color || `hsl(${(index * 67) % 360}, 70%, 65%)`;
        ctx.fill();
        ctx.strokeStyle = '#ffffff';
        ctx.lineWidth = 2;
        ctx.stroke();

        ctx.save();
        ctx.rotate(start + sweep / 2);
        ctx.fillStyle = '#1f2933';
        ctx.font = '600 15px sans-serif';
        ctx.textAlign = 'right';
        ctx.fillText(segment.label.slice(0, 18), radius - 14, 5);
        ctx.restore();
        start += sweep;
      });
      ctx.restore();
    };

    // rotation that brings the middle of segment `id` under the pointer
    const targetRotation = (id) => {
      let start = 0;
      for (const segment of segments) {
        const sweep = segment.probability * Math.PI * 2;
        if (segment.id === id) {
          const middle = start + sweep / 2;
          const turns = Math.PI * 2 * 5;
          const current = rotation % (Math.PI * 2);
          return rotation - current + turns + (Math.PI * 2 - middle);
        }
        start += sweep;
      }
      return rotation + Math.PI * 10;
    };

    const animateTo = (target) => new Promise((resolve) => {
      const from = rotation;
      const started = performance.now();
      const step = (now) => {
        const t = Math.min(1, (now - started) / SPIN_DURATION_MS);
        const eased = 1 - Math.pow(1 - t, 3);
        rotation = from + (target - from) * eased;
        drawWheel();
        if (t < 1) {
          requestAnimationFrame(step);
        } else {
          resolve();
        }
      };
      requestAnimationFrame(step);
    });

    const renderUsers = (users) => {
      document.getElementById('user-count').textContent = users.length;
      const list = document.getElementById('users');
      list.innerHTML = '';
      users.forEach((user) => {
        const item = document.createElement('li');

        const check = document.createElement('input');
        check.type = 'checkbox';
        check.checked = user.is_checked;
        check.addEventListener('change', () =>
          api(`/api/users/${user.id}/toggle`, { method: 'POST' }).then(refresh).catch(fail));

        const swatch = document.createElement('span');
        swatch.className = 'swatch';
        swatch.style.background = user.color || '#ccc';

        const name = document.createElement('span');
        name.className = 'name';
        name.textContent = `${user.name} (${user.stats.wins})`;

        const weight = document.createElement('input');
        weight.type = 'number';
        weight.min = 0;
        weight.max = 100;
        weight.placeholder = 'auto';
        weight.value = user.custom_weight ?? '';
        weight.addEventListener('change', () =>
          api(`/api/users/${user.id}/weight`, jsonBody('PUT', { weight: Number(weight.value || 0) }))
            .then(refresh).catch(fail));

        const remove = document.createElement('button');
        remove.className = 'ghost';
        remove.textContent = 'x';
        remove.addEventListener('click', () =>
          api(`/api/users/${user.id}`, { method: 'DELETE' }).then(refresh).catch(fail));

        item.append(check, swatch, name, weight, remove);
        list.appendChild(item);
      });
    };

    const renderHistory = (records) => {
      const list = document.getElementById('history');
      list.innerHTML = '';
      if (records.length === 0) {
        list.innerHTML = '<li class="muted">No spins yet</li>';
        return;
      }
      records.forEach((record) => {
        const item = document.createElement('li');
        const when = new Date(record.timestamp).toLocaleString();
        item.innerHTML = `<span class="name"></span><span class="muted">${when}</span>`;
        item.querySelector('.name').textContent =
          `${record.user_name} (${(record.probability * 100).toFixed(1)}%)`;
        list.appendChild(item);
      });
    };

    const renderAnalytics = (report) => {
      const summary = report.summary;
      document.getElementById('summary').textContent = summary.total_spins === 0
        ? 'No spins recorded'
        : `${summary.total_spins} spins, most frequent: ${summary.most_frequent_winner}, ` +
          `average odds ${(summary.average_probability * 100).toFixed(1)}%`;
      const list = document.getElementById('leaderboard');
      list.innerHTML = '';
      report.leaderboard.forEach((entry) => {
        const item = document.createElement('li');
        item.innerHTML = '<span class="name"></span><span class="muted"></span>';
        item.querySelector('.name').textContent = entry.name;
        item.querySelector('.muted').textContent =
          `${entry.wins} wins, ${entry.selection_rate.toFixed(1)}%`;
        list.appendChild(item);
      });
    };

    const refresh = async () => {
      const [users, wheel, history, report] = await Promise.all([
        api('/api/users'),
        api('/api/wheel'),
        api('/api/history/recent?limit=10'),
        api('/api/analytics')
      ]);
      segments = wheel.segments;
      renderUsers(users);
      renderHistory(history);
      renderAnalytics(report);
      drawWheel();
    };

    const fail = (err) => setStatus(err.message, 'error');

    spinButton.addEventListener('click', async () => {
      spinButton.disabled = true;
      resultEl.textContent = '';
      setStatus('', '');
      try {
        const outcome = await api('/api/spin', { method: 'POST' });
        await animateTo(targetRotation(outcome.segment.id));
        resultEl.textContent = outcome.prize;
        await refresh();
      } catch (err) {
        fail(err);
      } finally {
        spinButton.disabled = false;
      }
    });

    document.getElementById('add-form').addEventListener('submit', (event) => {
      event.preventDefault();
      const input = document.getElementById('new-name');
      api('/api/users', jsonBody('POST', { name: input.value }))
        .then(() => {
          input.value = '';
          return refresh();
        })
        .catch(fail);
    });

    document.getElementById('clear-history').addEventListener('click', () => {
      api('/api/history', { method: 'DELETE' }).then(refresh).catch(fail);
    });

    document.getElementById('reset-all').addEventListener('click', () => {
      if (confirm('Reset all spin history and user statistics? This cannot be undone.')) {
        api('/api/reset', { method: 'POST' }).then(refresh).catch(fail);
      }
    });

    refresh().catch(fail);
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_are_filled() {
        let html = render_index(2500, 4);
        assert!(html.contains("const SPIN_DURATION_MS = 2500;"));
        assert!(html.contains("<span id=\"user-count\">4</span>"));
        assert!(!html.contains("{{"));
    }
}
