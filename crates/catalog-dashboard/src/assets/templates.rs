//! Built-in page templates.
//!
//! Stored as `(name, content)` pairs and registered by
//! [`MiniJinjaEngine::with_builtin_templates`](crate::render::MiniJinjaEngine::with_builtin_templates).
//! All names end in `.html`, so every `{{ ... }}` is auto-escaped.

pub const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", LAYOUT_TEMPLATE),
    ("_form.html", FORM_TEMPLATE),
    ("dashboard.html", DASHBOARD_TEMPLATE),
    ("detail.html", DETAIL_TEMPLATE),
    ("edit.html", EDIT_TEMPLATE),
    ("error.html", ERROR_TEMPLATE),
];

/// Page shell.
///
/// Variables: `page_title`, `messages`; child templates fill `content`.
const LAYOUT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{% block title %}{{ page_title }}{% endblock %}</title>
    <style>
        body { font-family: system-ui, sans-serif; background: #f4f6f9; margin: 0; }
        .container { max-width: 1100px; margin: 0 auto; padding: 20px; }
        header h1 { margin: 0 0 20px; }
        .panel { background: #fff; border-radius: 8px; padding: 20px; margin-bottom: 20px; }
        .alert { padding: 12px 16px; border-radius: 6px; margin-bottom: 16px; }
        .alert-success { background: #d4edda; color: #155724; }
        .alert-danger { background: #f8d7da; color: #721c24; }
        .alert-info { background: #d1ecf1; color: #0c5460; }
        .alert-warning { background: #fff3cd; color: #856404; }
        .form-group { margin-bottom: 12px; }
        .form-group label { display: block; font-weight: 600; margin-bottom: 4px; }
        .form-group input, .form-group textarea { width: 100%; padding: 8px; box-sizing: border-box; }
        .field-error { color: #721c24; font-size: 0.9em; }
        .product-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(240px, 1fr)); gap: 16px; }
        .product-card { border: 1px solid #e1e4e8; border-radius: 8px; padding: 16px; }
        .product-card-title { font-weight: 700; margin-bottom: 8px; }
        .product-card-price { font-size: 1.2em; color: #2e7d32; margin: 8px 0; }
        .btn { display: inline-block; padding: 6px 12px; border: 0; border-radius: 4px; text-decoration: none; cursor: pointer; }
        .btn-primary { background: #1976d2; color: #fff; }
        .btn-info { background: #0288d1; color: #fff; }
        .btn-warning { background: #f9a825; color: #000; }
        .btn-danger { background: #d32f2f; color: #fff; }
        .inline { display: inline; }
        .muted { color: #6a737d; }
    </style>
</head>
<body>
<div class="container">
    <header><h1>{{ page_title }}</h1></header>
    {% for m in messages %}
    <div class="alert {{ m.class }}">{{ m.text }}</div>
    {% endfor %}
    {% block content %}{% endblock %}
</div>
</body>
</html>
"#;

/// Product fields shared by the add and edit forms.
///
/// Variables: `form` (a serialized `FormViewResult<ProductForm>`).
const FORM_TEMPLATE: &str = r#"<form method="post" action="{{ form.action }}">
    {% if form.validation_errors %}
    <div class="alert alert-danger">
        <ul>
        {% for e in form.validation_errors %}<li>{{ e.message }}</li>{% endfor %}
        </ul>
    </div>
    {% endif %}
    <div class="form-group">
        <label for="product_name">Product Name *</label>
        <input type="text" id="product_name" name="product_name" value="{{ form.values.product_name }}" required>
    </div>
    <div class="form-group">
        <label for="product_type">Category</label>
        <input type="text" id="product_type" name="product_type" value="{{ form.values.product_type }}">
    </div>
    <div class="form-group">
        <label for="brand">Brand</label>
        <input type="text" id="brand" name="brand" value="{{ form.values.brand }}">
    </div>
    <div class="form-group">
        <label for="material">Material</label>
        <input type="text" id="material" name="material" value="{{ form.values.material }}">
    </div>
    <div class="form-group">
        <label for="price">Price ({{ currency }}) *</label>
        <input type="number" id="price" name="price" step="0.01" value="{{ form.values.price }}" required>
    </div>
    <div class="form-group">
        <label for="colors">Available Colors</label>
        <input type="text" id="colors" name="colors" placeholder="Red, Blue, Green" value="{{ form.values.colors }}">
    </div>
    <div class="form-group">
        <label for="features_list">Features (one per line)</label>
        <textarea id="features_list" name="features_list" rows="4">{{ form.values.features_list }}</textarea>
    </div>
    <button type="submit" class="btn btn-primary">{{ form.submit_label }}</button>
</form>
"#;

/// Product grid with the add form, search box and sort select.
///
/// Variables: `list` (`ListViewResult<Product>`), `form`, `query`, `sort`,
/// `sort_options` (`value`, `label`).
const DASHBOARD_TEMPLATE: &str = r#"{% extends "layout.html" %}
{% block content %}
<div class="panel">
    <h2>Add Product</h2>
    {% include "_form.html" %}
</div>
<div class="panel">
    <h2>{{ list.intro }} (<span id="productCount">{{ list.items | length }}</span>)</h2>
    <form method="get" action="/">
        <input type="search" name="q" placeholder="Search by name, category or brand" value="{{ query }}">
        <select name="sort">
            {% for opt in sort_options %}
            <option value="{{ opt.value }}"{% if opt.value == sort %} selected{% endif %}>{{ opt.label }}</option>
            {% endfor %}
        </select>
        <button type="submit" class="btn btn-primary">Apply</button>
    </form>
    {% if list.filter_summary %}
    <p class="muted">Showing {{ list.items | length }} of {{ list.total_count }}, {{ list.filter_summary }}</p>
    {% endif %}
    {% if list.items | length == 0 %}
    <div class="no-data-message">
        {% if query %}<p>No products match your search.</p>{% else %}<p>No products yet. Add your first product above!</p>{% endif %}
    </div>
    {% else %}
    <div class="product-grid">
        {% for prod in list.items %}
        <div class="product-card">
            <div class="product-card-title">{{ prod.product_name }}</div>
            <div class="product-card-meta">
                {% if prod.brand %}<strong>{{ prod.brand }}</strong><br>{% endif %}
                {% if prod.product_type %}Category: {{ prod.product_type }}<br>{% endif %}
                {% if prod.material %}Material: {{ prod.material }}{% endif %}
            </div>
            <div class="product-card-price">{{ prod.price | money }}</div>
            <div class="product-card-actions">
                <a class="btn btn-info" href="/products/{{ prod.product_id }}">View</a>
                <a class="btn btn-warning" href="/products/{{ prod.product_id }}/edit">Edit</a>
                <form class="inline" method="post" action="/products/{{ prod.product_id }}/delete" onsubmit="return confirm('Delete this product?')">
                    <button type="submit" class="btn btn-danger">Delete</button>
                </form>
            </div>
        </div>
        {% endfor %}
    </div>
    {% endif %}
</div>
{% endblock %}
"#;

/// Single product.
///
/// Variables: `detail` (`DetailViewResult<Product>`).
const DETAIL_TEMPLATE: &str = r#"{% extends "layout.html" %}
{% block title %}{{ detail.title }} - {{ page_title }}{% endblock %}
{% block content %}
<div class="panel">
    <h2>{{ detail.title }}</h2>
    {% if detail.subtitle %}<p class="muted">{{ detail.subtitle }}</p>{% endif %}
    <div class="details-grid">
        <div class="detail-item"><strong>Category</strong> {{ detail.item.product_type or "N/A" }}</div>
        <div class="detail-item"><strong>Brand</strong> {{ detail.item.brand or "N/A" }}</div>
        <div class="detail-item"><strong>Material</strong> {{ detail.item.material or "N/A" }}</div>
        <div class="detail-item"><strong>Price</strong> {{ detail.item.price | money }}</div>
        <div class="detail-item"><strong>Delivery</strong> {% if detail.item.delivery.standard %}Standard{% else %}Not available{% endif %}</div>
    </div>
    {% if detail.item.variants.colors %}
    <div class="detail-section"><strong>Available Colors:</strong>
        <ul>{% for color in detail.item.variants.colors %}<li>{{ color }}</li>{% endfor %}</ul>
    </div>
    {% endif %}
    {% if detail.item.features %}
    <div class="detail-section"><strong>Features:</strong>
        <pre class="features">{{ detail.item.features | join_lines }}</pre>
    </div>
    {% endif %}
    <div class="detail-section">
        {% for action in detail.actions %}
        {% if action.method == "POST" %}
        <form class="inline" method="post" action="{{ action.href }}" onsubmit="return confirm('{{ action.label }} this product?')">
            <button type="submit" class="btn btn-danger">{{ action.label }}</button>
        </form>
        {% else %}
        <a class="btn btn-warning" href="{{ action.href }}">{{ action.label }}</a>
        {% endif %}
        {% endfor %}
    </div>
</div>
{% endblock %}
"#;

/// Edit form for one product.
///
/// Variables: `form`, `product_name`.
const EDIT_TEMPLATE: &str = r#"{% extends "layout.html" %}
{% block title %}Edit {{ product_name }} - {{ page_title }}{% endblock %}
{% block content %}
<div class="panel">
    <h2>Edit Product</h2>
    {% include "_form.html" %}
    <p><a href="/">Back to all products</a></p>
</div>
{% endblock %}
"#;

/// Error page.
///
/// Variables: `status`, `message`.
const ERROR_TEMPLATE: &str = r#"{% extends "layout.html" %}
{% block title %}{{ status }} - {{ page_title }}{% endblock %}
{% block content %}
<div class="panel">
    <div class="alert alert-danger">{{ message }}</div>
    <p><a href="/">Back to all products</a></p>
</div>
{% endblock %}
"#;
